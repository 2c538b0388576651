use std::io::Cursor;

use super::*;

fn spec(channels: u16, sample_rate: u32, bits: u16) -> hound::WavSpec {
    hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    }
}

fn wav_i16(spec: hound::WavSpec, samples: &[i16]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
    cursor.into_inner()
}

#[test]
fn decodes_and_normalizes_int16() {
    let bytes = wav_i16(spec(1, 8000, 16), &[0, 16384, -32768, 32767]);
    let pcm = decode_wav(&bytes).unwrap();
    assert_eq!(pcm.sample_rate, 8000);
    assert_eq!(pcm.channels, 1);
    assert_eq!(pcm.samples.len(), 4);
    assert_eq!(pcm.samples[0], 0.0);
    assert_eq!(pcm.samples[1], 0.5);
    assert_eq!(pcm.samples[2], -1.0);
    assert!(pcm.samples[3] < 1.0 && pcm.samples[3] > 0.99);
}

#[test]
fn decodes_float_samples() {
    let wav_spec = hound::WavSpec {
        channels: 2,
        sample_rate: 4,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, wav_spec).unwrap();
    for s in [0.25f32, -0.25, 0.5, -0.5] {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();

    let pcm = decode_wav(&cursor.into_inner()).unwrap();
    assert_eq!(pcm.channels, 2);
    assert_eq!(pcm.samples, vec![0.25, -0.25, 0.5, -0.5]);
    assert_eq!(pcm.duration_sec(), 0.5);
}

#[test]
fn garbage_is_a_format_error() {
    let err = decode_wav(b"definitely not a riff container").unwrap_err();
    assert!(matches!(err, EngineError::Format(_)), "{err:?}");
}

#[test]
fn truncated_stream_is_reported_as_such() {
    let mut bytes = wav_i16(spec(1, 8000, 16), &[7; 100]);
    bytes.truncate(bytes.len() - 51);
    assert_eq!(decode_wav(&bytes).unwrap_err(), EngineError::UnexpectedEos);

    let header_only = &wav_i16(spec(1, 8000, 16), &[1, 2])[..10];
    assert_eq!(decode_wav(header_only).unwrap_err(), EngineError::UnexpectedEos);
}

#[test]
fn empty_data_chunk_is_invalid_data() {
    let bytes = wav_i16(spec(1, 8000, 16), &[]);
    assert!(matches!(
        decode_wav(&bytes).unwrap_err(),
        EngineError::InvalidData(_)
    ));
}
