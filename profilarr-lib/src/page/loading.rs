use rand::{Rng, seq::SliceRandom};

pub const LOADING_MESSAGES: [&str; 5] = [
    "Profiling your media collection...",
    "Organizing your digital hoard...",
    "Calibrating the flux capacitor...",
    "Synchronizing with the movie matrix...",
    "Optimizing your binge-watching potential...",
];

/// Pick one of [`LOADING_MESSAGES`] uniformly at random.
pub fn pick_loading_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOADING_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(LOADING_MESSAGES[0])
}
