use std::io::Read;

use doctor_core::{validate_artifact, ArtifactCandidate, SubmissionPolicy};
use doctor_engine::{compress, CompressedPayload};
use flate2::read::GzDecoder;

fn decompress(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
    out
}

fn gcode_of_size(target: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(target + 64);
    let mut i = 0u64;
    while out.len() < target {
        out.extend_from_slice(
            format!("G1 X{} Y{} E{:.4}\n", i % 220, (i * 7) % 220, i as f64 * 0.0331).as_bytes(),
        );
        i += 1;
    }
    out.truncate(target);
    out
}

#[test]
fn round_trips_empty_input() {
    let compressed = compress(&[]).unwrap();
    assert!(!compressed.is_empty(), "an empty gzip stream still has a header");
    assert_eq!(decompress(&compressed), Vec::<u8>::new());
}

#[test]
fn round_trips_assorted_inputs() {
    let binary: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
    let inputs: Vec<Vec<u8>> = vec![
        b"G28\n".to_vec(),
        vec![0u8; 1],
        binary,
        gcode_of_size(5 * 1024 * 1024),
    ];
    for input in inputs {
        let compressed = compress(&input).unwrap();
        assert_eq!(decompress(&compressed), input, "len {}", input.len());
    }
}

#[test]
fn output_is_deterministic_and_gzip_framed() {
    let input = gcode_of_size(64 * 1024);
    let first = compress(&input).unwrap();
    let second = compress(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(&first[..2], &[0x1f, 0x8b]);
    assert!(first.len() < input.len());
}

#[test]
fn payload_name_gets_gz_suffix() {
    let artifact = validate_artifact(
        &SubmissionPolicy::default(),
        ArtifactCandidate::new("part.gcode", b"G28\nM104 S200\n".to_vec()),
    )
    .unwrap();

    let payload = CompressedPayload::from_artifact(&artifact).unwrap();
    assert_eq!(payload.original_name, "part.gcode.gz");
    assert_eq!(decompress(&payload.bytes), b"G28\nM104 S200\n");
}
