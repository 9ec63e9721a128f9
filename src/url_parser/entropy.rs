/// Character-level Shannon entropy of `text` in bits.
///
/// Surrounding whitespace is ignored and blank input returns `0.0`.
/// Frequencies are summed in first-occurrence order so equal inputs always
/// produce bit-identical results.
pub fn shannon_entropy(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let mut counts: Vec<(char, usize)> = Vec::new();
    let mut length = 0usize;
    for ch in text.chars() {
        length += 1;
        match counts.iter_mut().find(|(c, _)| *c == ch) {
            Some((_, n)) => *n += 1,
            None => counts.push((ch, 1)),
        }
    }

    let length = length as f64;
    let entropy = -counts
        .iter()
        .map(|&(_, n)| {
            let p = n as f64 / length;
            p * p.log2()
        })
        .sum::<f64>();

    if entropy > 0.0 {
        entropy
    } else {
        0.0
    }
}
