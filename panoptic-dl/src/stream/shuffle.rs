use crate::common::*;

struct ShuffleState<S>
where
    S: Stream,
{
    stream: Pin<Box<S>>,
    buffer: Vec<S::Item>,
    rng: StdRng,
    capacity: usize,
    exhausted: bool,
}

/// Approximate decorrelation through a bounded buffer: hold up to
/// `capacity` items, emit a uniformly drawn one whenever the buffer is
/// topped up, then drain the leftovers in random order at end of stream.
pub fn shuffle<S>(stream: S, capacity: usize, rng: StdRng) -> impl Stream<Item = S::Item> + Send
where
    S: Stream + Send + 'static,
    S::Item: Send,
{
    let state = ShuffleState {
        stream: Box::pin(stream),
        buffer: Vec::with_capacity(capacity),
        rng,
        capacity: capacity.max(1),
        exhausted: false,
    };

    stream::unfold(state, |mut state| async move {
        while !state.exhausted && state.buffer.len() < state.capacity {
            match state.stream.next().await {
                Some(item) => state.buffer.push(item),
                None => state.exhausted = true,
            }
        }

        if state.buffer.is_empty() {
            return None;
        }

        let index = state.rng.gen_range(0..state.buffer.len());
        let item = state.buffer.swap_remove(index);
        Some((item, state))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shuffle_emits_every_item_once() {
        let items: Vec<usize> =
            shuffle(stream::iter(0..10), 4, StdRng::seed_from_u64(0)).collect().await;

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn shuffle_is_deterministic_per_seed() {
        let first: Vec<usize> =
            shuffle(stream::iter(0..32), 8, StdRng::seed_from_u64(7)).collect().await;
        let second: Vec<usize> =
            shuffle(stream::iter(0..32), 8, StdRng::seed_from_u64(7)).collect().await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn capacity_may_exceed_the_stream_length() {
        let items: Vec<usize> =
            shuffle(stream::iter(0..5), 100, StdRng::seed_from_u64(3)).collect().await;

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..5).collect::<Vec<_>>());
    }
}
