//! DAF/SPK container decoding.
//!
//! Reading order for one lookup: [`daf_header`] and [`summary_index`] once at
//! load time, then [`summary_index::SummaryIndex::locate`],
//! [`record_address::RecordAddress::locate`] and
//! [`ephemeris_record::ChebyshevRecord::read`] per query.
pub mod byte_source;
pub mod daf_header;
pub mod directory;
pub mod ephemeris_record;
pub mod naif_ids;
pub mod record_address;
pub mod summary_index;
pub mod summary_record;
