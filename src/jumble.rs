use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last slot down, swapping each slot with one drawn uniformly
/// from the not-yet-fixed prefix (itself included), so every permutation,
/// identity included, is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Letters of `word` in a random order
pub fn jumble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Vec<char> {
    let mut letters: Vec<char> = word.chars().collect();
    shuffle(&mut letters, rng);
    letters
}

/// Shuffled visiting order over `len` items
pub fn traversal_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    shuffle(&mut order, rng);
    order
}
