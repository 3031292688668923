//! End-to-end graph compilation tests.

mod common;

use ffgraph::{FileHandle, FilterGraph, Stream, filters};
use proptest::prelude::*;
use proptest::sample::Index;

use common::{assert_dependency_order, init_tracing};

#[test]
fn test_boomerang() {
    init_tracing();

    let clip = Stream::input_with_options("clip.mp4", ["-t", "3"]);
    let (forward, backward) = filters::split(&clip.video());
    let looped = filters::concat(1, 0, &[forward, filters::reverse(&backward)]);

    let mut graph = FilterGraph::new();
    graph.add_output(
        "boomerang.mp4",
        vec!["-c:v".into(), "libx264".into()],
        &looped,
    );

    assert_eq!(
        graph.compile().args(),
        [
            "-t",
            "3",
            "-i",
            "clip.mp4",
            "-filter_complex",
            "[0:v]split=2[s0][s1];[s1]reverse[s2];[s0][s2]concat=v=1:a=0[s3]",
            "-map",
            "[s3]",
            "-c:v",
            "libx264",
            "boomerang.mp4",
        ]
    );
    assert_dependency_order(&graph);
}

#[test]
fn test_shared_branches_across_outputs() {
    init_tracing();

    let video = Stream::input("talk.mp4");
    let music = Stream::input("music.mp3");
    let slowed = filters::multiply_pts(&video.video(), 2.0);
    let voice = filters::atempo(&video.audio(), 0.5);
    let bed = filters::volume(&music, 0.3);
    let mixed = filters::amix(&[voice.clone(), bed]);

    let mut graph = FilterGraph::new();
    graph.add_output("mixed.mp4", vec![], &[slowed.clone(), mixed]);
    graph.add_output("voice.mp4", vec![], &[slowed, voice]);

    let compiled = graph.compile();
    assert_eq!(compiled.inputs, ["-i", "talk.mp4", "-i", "music.mp3"]);
    assert_eq!(
        compiled.filter_complex.as_deref(),
        Some(concat!(
            "[0:v]setpts=2.000000*PTS[s0];",
            "[0:a]atempo=0.500000[s1];",
            "[1]volume=0.300000[s2];",
            "[s1][s2]amix=inputs=2:duration=shortest[s3]"
        ))
    );
    assert_eq!(
        compiled.outputs,
        ["-map", "[s0]", "-map", "[s3]", "mixed.mp4", "-map", "[s0]", "-map", "[s1]", "voice.mp4"]
    );
    assert_dependency_order(&graph);
}

#[test]
fn test_silent_track_for_video_only_input() {
    let video = Stream::input("screen.mkv");
    let mut graph = FilterGraph::new();
    graph.add_output(
        "out.mp4",
        vec!["-shortest".into()],
        &[video.video(), filters::anullsrc()],
    );

    assert_eq!(
        graph.compile().args(),
        [
            "-i",
            "screen.mkv",
            "-f",
            "lavfi",
            "-i",
            "anullsrc",
            "-map",
            "0:v",
            "-map",
            "1",
            "-shortest",
            "out.mp4"
        ]
    );
}

#[test]
fn test_file_handles_in_and_out() {
    init_tracing();

    let source = FileHandle::new(tempfile::tempfile().unwrap());
    let sink = FileHandle::new(tempfile::tempfile().unwrap());
    let stream = Stream::file(&source);

    let mut graph = FilterGraph::new();
    graph.add_output("flipped.mp4", vec![], &[filters::hflip(&stream)]);
    graph.add_file_output(&sink, vec!["-f".into(), "wav".into()], &[stream.audio()]);

    let compiled = graph.compile();
    assert_eq!(compiled.inputs, ["-i", "/dev/fd/3"]);
    assert_eq!(
        compiled.outputs,
        ["-map", "[s0]", "flipped.mp4", "-map", "0:a", "-f", "wav", "/dev/fd/4"]
    );
    assert_eq!(graph.files().len(), 2);
    assert!(graph.files()[0].same_resource(&source));
    assert!(graph.files()[1].same_resource(&sink));
}

#[derive(Debug, Clone)]
enum Step {
    Hflip(Index),
    Overlay(Index, Index),
    Split(Index, bool),
    Mix(Index, Index),
    Volume(Index, u8),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<Index>().prop_map(Step::Hflip),
        (any::<Index>(), any::<Index>()).prop_map(|(a, b)| Step::Overlay(a, b)),
        (any::<Index>(), any::<bool>()).prop_map(|(a, second)| Step::Split(a, second)),
        (any::<Index>(), any::<Index>()).prop_map(|(a, b)| Step::Mix(a, b)),
        (any::<Index>(), 0u8..4).prop_map(|(a, v)| Step::Volume(a, v)),
    ]
}

fn build(sources: usize, steps: &[Step]) -> Vec<Stream> {
    let mut pool: Vec<Stream> = (0..sources)
        .map(|i| Stream::input(format!("in{}.mp4", i)))
        .collect();

    for step in steps {
        let next = match step {
            Step::Hflip(a) => filters::hflip(a.get(&pool)),
            Step::Overlay(a, b) => filters::overlay(a.get(&pool), b.get(&pool), 0, 0),
            Step::Split(a, second) => {
                let (x, y) = filters::split(a.get(&pool));
                if *second { y } else { x }
            }
            Step::Mix(a, b) => filters::amix(&[a.get(&pool).clone(), b.get(&pool).clone()]),
            Step::Volume(a, v) => filters::volume(a.get(&pool), f64::from(*v) / 2.0),
        };
        pool.push(next);
    }
    pool
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Whatever the graph shape, filters come out in dependency order with
    /// unique labels, and compiling is repeatable.
    #[test]
    fn prop_filters_in_dependency_order(
        sources in 1usize..4,
        steps in prop::collection::vec(step(), 1..40),
        outputs in 1usize..4,
    ) {
        let pool = build(sources, &steps);
        let mut graph = FilterGraph::new();
        for (i, stream) in pool.iter().rev().take(outputs).enumerate() {
            graph.add_output(format!("out{}.mp4", i), vec![], std::slice::from_ref(stream));
        }

        assert_dependency_order(&graph);
        prop_assert!(graph.inputs().len() <= sources);
        prop_assert_eq!(graph.compile(), graph.compile());
    }

    /// Building the same graph twice in one context registers nothing new.
    #[test]
    fn prop_rebuilding_is_deduplicated(
        sources in 1usize..4,
        steps in prop::collection::vec(step(), 1..30),
    ) {
        let mut graph = FilterGraph::new();
        let first = build(sources, &steps);
        let first_ref = graph.resolve(first.last().unwrap());
        let filters = graph.filters().len();
        let labels = graph.label_count();

        let second = build(sources, &steps);
        let second_ref = graph.resolve(second.last().unwrap());

        prop_assert_eq!(first_ref, second_ref);
        prop_assert_eq!(graph.filters().len(), filters);
        prop_assert_eq!(graph.label_count(), labels);
    }
}
