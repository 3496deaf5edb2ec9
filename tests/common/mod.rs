#![allow(dead_code)]

use approx::assert_relative_eq;
use bsp_ephem::position::Position;

const RECORD_LEN: usize = 1024;
const WORDS_PER_RECORD: usize = RECORD_LEN / 8;
/// File record, one summary record, one name record.
const DATA_START_RECORD: usize = 3;

/// One type 2 segment of a synthetic kernel.
pub struct Segment {
    pub target: i32,
    pub center: i32,
    pub start_time: f64,
    pub last_time: f64,
    pub init: f64,
    pub intlen: f64,
    /// Each entry is a full record: `[mid, radius, x.., y.., z..]`.
    pub records: Vec<Vec<f64>>,
}

impl Segment {
    /// Segment whose records tile `[init, init + n * intlen]` exactly.
    pub fn tiled(target: i32, center: i32, init: f64, intlen: f64, records: Vec<Vec<f64>>) -> Self {
        let last_time = init + intlen * records.len() as f64;
        Segment {
            target,
            center,
            start_time: init,
            last_time,
            init,
            intlen,
            records,
        }
    }

    fn words(&self) -> Vec<f64> {
        let rsize = self.records.first().map_or(0, Vec::len);
        let mut words: Vec<f64> = self.records.iter().flatten().copied().collect();
        words.extend([
            self.init,
            self.intlen,
            rsize as f64,
            self.records.len() as f64,
        ]);
        words
    }
}

/// Record of degree 1 per axis: constant `(x, y, z)` over its interval.
pub fn constant_record(mid: f64, radius: f64, x: f64, y: f64, z: f64) -> Vec<f64> {
    vec![mid, radius, x, y, z]
}

/// Record of degree 3 per axis whose X series is `a + b * et` over its interval,
/// Y is `2 * X`, Z is `-X`.
pub fn linear_record(mid: f64, radius: f64, a: f64, b: f64) -> Vec<f64> {
    let c0 = a + b * mid;
    let c1 = b * radius;
    vec![
        mid,
        radius,
        c0,
        c1,
        0.0,
        2.0 * c0,
        2.0 * c1,
        0.0,
        -c0,
        -c1,
        0.0,
    ]
}

/// Serialize `segments` as a little-endian DAF/SPK kernel.
///
/// Layout: file record, a single summary record (record 2), an empty name
/// record, then the segment data back to back.
pub fn build_kernel(segments: &[Segment]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut summaries = Vec::new();
    let mut next_address = DATA_START_RECORD * WORDS_PER_RECORD + 1;

    for segment in segments {
        let words = segment.words();
        let start = next_address;
        let last = start + words.len() - 1;
        next_address = last + 1;

        let mut summary = Vec::with_capacity(40);
        summary.extend(segment.start_time.to_le_bytes());
        summary.extend(segment.last_time.to_le_bytes());
        for value in [
            segment.target,
            segment.center,
            1,
            2,
            start as i32,
            last as i32,
        ] {
            summary.extend(value.to_le_bytes());
        }
        summaries.push(summary);
        data.extend(words.iter().flat_map(|w| w.to_le_bytes()));
    }

    let mut kernel = file_record(next_address as i32);

    let mut summary_record = Vec::with_capacity(RECORD_LEN);
    for control in [0.0f64, 0.0, segments.len() as f64] {
        summary_record.extend(control.to_le_bytes());
    }
    summary_record.extend(summaries.concat());
    summary_record.resize(RECORD_LEN, 0);
    kernel.extend(summary_record);

    kernel.extend(vec![b' '; RECORD_LEN]);
    kernel.extend(data);
    kernel
}

fn file_record(free: i32) -> Vec<u8> {
    let mut record = Vec::with_capacity(RECORD_LEN);
    record.extend(b"DAF/SPK ");
    record.extend(2i32.to_le_bytes());
    record.extend(6i32.to_le_bytes());
    let mut ifname = b"SYNTHETIC TEST KERNEL".to_vec();
    ifname.resize(60, b' ');
    record.extend(ifname);
    record.extend(2i32.to_le_bytes());
    record.extend(2i32.to_le_bytes());
    record.extend(free.to_le_bytes());
    record.extend(b"LTL-IEEE");
    record.resize(RECORD_LEN, 0);
    record
}

pub fn assert_state_close(actual: &Position, expected: &Position, max_relative: f64) {
    assert_relative_eq!(actual.x, expected.x, max_relative = max_relative);
    assert_relative_eq!(actual.y, expected.y, max_relative = max_relative);
    assert_relative_eq!(actual.z, expected.z, max_relative = max_relative);
    assert_relative_eq!(
        actual.velocity_x,
        expected.velocity_x,
        max_relative = max_relative
    );
    assert_relative_eq!(
        actual.velocity_y,
        expected.velocity_y,
        max_relative = max_relative
    );
    assert_relative_eq!(
        actual.velocity_z,
        expected.velocity_z,
        max_relative = max_relative
    );
}
