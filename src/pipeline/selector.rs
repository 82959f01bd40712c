//! Video selection: turning the source sequence into a processing queue.

use futures::stream::StreamExt;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::source::{SelectionMode, VideoRef, VideoStream};

/// The ordered queue of videos the driver works through.
///
/// `Ordered` mirrors the source lazily and is as restartable as the source is
/// (generally: not at all). `Sampled` owns its draws up front.
pub enum ProcessingQueue {
    Ordered(VideoStream),
    Sampled(std::vec::IntoIter<VideoRef>),
}

impl ProcessingQueue {
    /// Pull the next video to process, if any.
    pub async fn next(&mut self) -> Option<VideoRef> {
        match self {
            Self::Ordered(stream) => stream.next().await,
            Self::Sampled(iter) => iter.next(),
        }
    }
}

/// Build the processing queue for `mode`.
///
/// `All` passes the source through untouched. `RandomSample` first collects
/// the entire source (sources can be large, hence the buffering notice), then
/// makes `count` independent uniform draws with replacement; duplicates are
/// expected and preserved. An empty source yields an empty queue for any
/// count.
pub async fn select(source: VideoStream, mode: SelectionMode, rng: &mut StdRng) -> ProcessingQueue {
    match mode {
        SelectionMode::All => ProcessingQueue::Ordered(source),
        SelectionMode::RandomSample { count } => {
            info!("Buffering the full video list for random sampling...");
            let pool: Vec<VideoRef> = source.collect().await;
            debug!("Buffered {} candidate videos", pool.len());

            let mut draws = Vec::with_capacity(count);
            if !pool.is_empty() {
                for _ in 0..count {
                    let index = rng.gen_range(0..pool.len());
                    draws.push(pool[index].clone());
                }
            }
            ProcessingQueue::Sampled(draws.into_iter())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::time::Duration;

    fn video(id: &str) -> VideoRef {
        VideoRef {
            id: id.to_string(),
            title: format!("Video {id}"),
            duration: Some(Duration::from_secs(60)),
        }
    }

    fn source_of(ids: &[&str]) -> VideoStream {
        let videos: Vec<VideoRef> = ids.iter().map(|id| video(id)).collect();
        stream::iter(videos).boxed()
    }

    async fn drain(mut queue: ProcessingQueue) -> Vec<VideoRef> {
        let mut out = Vec::new();
        while let Some(video) = queue.next().await {
            out.push(video);
        }
        out
    }

    #[tokio::test]
    async fn test_all_preserves_source_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let queue = select(source_of(&["a", "b", "c"]), SelectionMode::All, &mut rng).await;
        let out = drain(queue).await;
        let ids: Vec<&str> = out.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_sample_yields_exactly_count_items() {
        let mut rng = StdRng::seed_from_u64(2);
        let queue = select(
            source_of(&["a", "b", "c"]),
            SelectionMode::RandomSample { count: 10 },
            &mut rng,
        )
        .await;
        assert_eq!(drain(queue).await.len(), 10);
    }

    #[tokio::test]
    async fn test_sample_of_empty_source_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let queue = select(
            source_of(&[]),
            SelectionMode::RandomSample { count: 10 },
            &mut rng,
        )
        .await;
        assert!(drain(queue).await.is_empty());
    }

    #[tokio::test]
    async fn test_sample_count_zero_is_empty() {
        let mut rng = StdRng::seed_from_u64(4);
        let queue = select(
            source_of(&["a", "b"]),
            SelectionMode::RandomSample { count: 0 },
            &mut rng,
        )
        .await;
        assert!(drain(queue).await.is_empty());
    }

    #[tokio::test]
    async fn test_sample_draws_with_replacement() {
        // 10 draws from 3 videos must repeat something.
        let mut rng = StdRng::seed_from_u64(5);
        let queue = select(
            source_of(&["a", "b", "c"]),
            SelectionMode::RandomSample { count: 10 },
            &mut rng,
        )
        .await;
        let out = drain(queue).await;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for video in &out {
            *counts.entry(video.id.clone()).or_default() += 1;
        }
        assert!(counts.values().any(|&n| n > 1));
    }

    #[tokio::test]
    async fn test_sample_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(6);
        let queue = select(
            source_of(&["a", "b", "c"]),
            SelectionMode::RandomSample { count: 3000 },
            &mut rng,
        )
        .await;
        let out = drain(queue).await;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for video in &out {
            *counts.entry(video.id.clone()).or_default() += 1;
        }
        // Expected 1000 each; a wide tolerance keeps this deterministic-seed
        // test far from flaky while still catching a biased draw.
        for (id, n) in counts {
            assert!((700..=1300).contains(&n), "index {id} drawn {n} times");
        }
    }
}
