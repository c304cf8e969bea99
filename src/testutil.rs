//! Test-only helpers shared across module test suites.

/// Build a RIFF/WAVE buffer in memory: 16-bit mono PCM silence at
/// 8 kHz, with an optional LIST/INFO tag chunk (INAM = title,
/// IART = artist).
pub(crate) fn wav_bytes(samples: u32, tags: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let mut chunks: Vec<u8> = Vec::new();

    chunks.extend_from_slice(b"fmt ");
    chunks.extend_from_slice(&16u32.to_le_bytes());
    chunks.extend_from_slice(&1u16.to_le_bytes()); // PCM
    chunks.extend_from_slice(&1u16.to_le_bytes()); // mono
    chunks.extend_from_slice(&sample_rate.to_le_bytes());
    chunks.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    chunks.extend_from_slice(&2u16.to_le_bytes()); // block align
    chunks.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    if !tags.is_empty() {
        let mut info: Vec<u8> = Vec::new();
        info.extend_from_slice(b"INFO");
        for (key, value) in tags {
            let mut v = value.as_bytes().to_vec();
            v.push(0); // NUL terminator
            if v.len() % 2 == 1 {
                v.push(0); // word alignment
            }
            info.extend_from_slice(*key);
            info.extend_from_slice(&(v.len() as u32).to_le_bytes());
            info.extend_from_slice(&v);
        }
        chunks.extend_from_slice(b"LIST");
        chunks.extend_from_slice(&(info.len() as u32).to_le_bytes());
        chunks.extend_from_slice(&info);
    }

    let data = vec![0u8; (samples * 2) as usize];
    chunks.extend_from_slice(b"data");
    chunks.extend_from_slice(&(data.len() as u32).to_le_bytes());
    chunks.extend_from_slice(&data);

    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((4 + chunks.len()) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(&chunks);
    out
}
