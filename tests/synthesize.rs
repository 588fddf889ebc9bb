use hound::{SampleFormat, WavReader};
use phonosynth::{
    CaptureSink, ClockMode, Config, DeviceState, OutputDevice, QualityHint, SynthesisRequest,
    Synthesizer, WavHeader, encoder::HEADER_LEN,
};
use std::io::Cursor;

fn synth() -> Synthesizer {
    Synthesizer::new(Config {
        sample_rate: 22_050,
        ..Config::default()
    })
    .unwrap()
}

fn samples(bytes: &[u8]) -> Vec<i16> {
    WavReader::new(Cursor::new(bytes))
        .unwrap()
        .into_samples::<i16>()
        .map(Result::unwrap)
        .collect()
}

#[tokio::test]
async fn container_reads_back() {
    let bytes = synth()
        .synthesize(&SynthesisRequest::new("hello world").seed(1))
        .await
        .unwrap();
    let reader = WavReader::new(Cursor::new(&bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);

    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.sample_rate, 22_050);
    assert_eq!(header.channels, 1);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.frames(), reader.duration());
    assert!(samples(&bytes).iter().any(|s| *s != 0));
}

#[tokio::test]
async fn empty_text_is_a_header_only_container() {
    let bytes = synth().synthesize(&SynthesisRequest::new("")).await.unwrap();
    assert_eq!(bytes.len(), HEADER_LEN);
    let reader = WavReader::new(Cursor::new(&bytes)).unwrap();
    assert_eq!(reader.duration(), 0);
}

#[tokio::test]
async fn seeded_requests_are_byte_identical() {
    let s = synth();
    let request = SynthesisRequest::new("namaste, aap kaise hain?")
        .voice("priya-hi")
        .pitch_offset(10)
        .seed(42);
    let first = s.synthesize(&request).await.unwrap();
    let second = s.synthesize(&request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn double_speed_halves_the_duration() {
    let s = synth();
    let text = "the quick brown fox jumps over the lazy dog";
    let normal = s.render(&SynthesisRequest::new(text).seed(3)).await.unwrap();
    let fast = s
        .render(&SynthesisRequest::new(text).speed(2.0).seed(3))
        .await
        .unwrap();
    let ratio = normal.samples.len() as f64 / fast.samples.len() as f64;
    assert!((ratio - 2.0).abs() < 1e-3, "ratio {ratio}");
    assert!((normal.duration - 2.0 * fast.duration).abs() < 1e-3);
}

#[tokio::test]
async fn quality_hints_share_the_format() {
    let s = synth();
    let low = s
        .synthesize(&SynthesisRequest::new("hello").quality(QualityHint::Low).seed(5))
        .await
        .unwrap();
    let max = s
        .synthesize(
            &SynthesisRequest::new("hello")
                .quality(QualityHint::Maximum)
                .seed(5),
        )
        .await
        .unwrap();
    assert_eq!(low.len(), max.len());
    assert_eq!(low[..HEADER_LEN], max[..HEADER_LEN]);
    // only dither may differ, and it never moves a sample by more than one step
    for (a, b) in samples(&low).into_iter().zip(samples(&max)) {
        assert!((i32::from(a) - i32::from(b)).abs() <= 1);
    }
}

#[tokio::test]
async fn digits_render_as_a_pause() {
    let s = synth();
    let utterance = s.analyze("12345");
    assert_eq!(utterance.phoneme_count(), 0);
    assert_eq!(utterance.symbols.len(), 1);
    let audio = s.render(&SynthesisRequest::new("12345")).await.unwrap();
    // one pause at the default rate
    let expected = (0.3 / 4.75 * 22_050.0_f64).round() as usize;
    assert_eq!(audio.samples.len(), expected);
    assert!(audio.samples.iter().all(|s| *s == 0.0));
}

#[tokio::test]
async fn stop_does_not_cancel_committed_phonemes() {
    let config = Config {
        sample_rate: 16_000,
        ..Config::default()
    };
    let s = Synthesizer::new(config.clone()).unwrap();
    let sink = CaptureSink::new();
    let device = OutputDevice::acquire(&config, Box::new(sink.clone()), ClockMode::Manual);

    let handle = s
        .speak(&device, &SynthesisRequest::new("hello").seed(8))
        .await
        .unwrap();
    assert_eq!(device.state(), DeviceState::Running);
    handle.stop();
    handle.finished().await;
    assert!(handle.is_finished());

    let end = (handle.end_time() * 16_000.0).ceil() as u64;
    device.advance(end).unwrap();
    let start = (handle.start_time() * 16_000.0) as usize;
    let captured = sink.samples();
    assert!(captured[..start].iter().all(|s| *s == 0.0));
    assert!(captured[start..].iter().any(|s| *s != 0.0));

    device.close();
    assert!(device.resume().await.is_err());
}
