//! Terminal rendering for dataset samples and classifier output.

/// Darkest to brightest; pixel intensity indexes into this ramp.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Width of the probability bar column in characters.
const BAR_WIDTH: usize = 40;

/// Renders a [0, 1] grayscale pixel vector as ASCII art, one text row per
/// pixel row. Values outside [0, 1] are clamped (standardized inputs).
///
/// # Panics
/// Panics if `pixels.len() != width * height`.
pub fn ascii_image(pixels: &[f64], width: usize, height: usize) -> String {
    assert_eq!(
        pixels.len(),
        width * height,
        "ascii_image: {}×{} needs {} pixels, got {}",
        width, height, width * height, pixels.len()
    );

    let mut out = String::with_capacity((width + 1) * height);
    for row in pixels.chunks(width) {
        for &px in row {
            let clamped = px.clamp(0.0, 1.0);
            let idx = (clamped * (RAMP.len() - 1) as f64).round() as usize;
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}

/// Renders per-class probabilities as a horizontal bar chart, one line per
/// class, with the argmax row marked:
///
/// ```text
///     7  ████████████████████████████████░░░░░░░░  81.3%  ◀
/// ```
///
/// `labels` must have one entry per probability.
pub fn probability_bars(probs: &[f64], labels: &[String]) -> String {
    assert_eq!(
        probs.len(),
        labels.len(),
        "probability_bars: {} probabilities but {} labels",
        probs.len(), labels.len()
    );

    let best = probs.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i);

    let mut out = String::new();
    for (i, (&p, label)) in probs.iter().zip(labels.iter()).enumerate() {
        let clamped = p.clamp(0.0, 1.0);
        let filled = (clamped * BAR_WIDTH as f64).round() as usize;
        let marker = if Some(i) == best { "  ◀" } else { "" };
        out.push_str(&format!(
            "{:>6}  {}{}  {:>5.1}%{}\n",
            label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            clamped * 100.0,
            marker,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_image_has_one_line_per_row() {
        let img = ascii_image(&[0.0, 1.0, 0.5, 0.25], 2, 2);
        let lines: Vec<&str> = img.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 2);
        // Black maps to space, white to the densest glyph.
        assert_eq!(lines[0].chars().next().unwrap(), ' ');
        assert_eq!(lines[0].chars().nth(1).unwrap(), '@');
    }

    #[test]
    #[should_panic(expected = "needs 4 pixels")]
    fn ascii_image_rejects_wrong_length() {
        let _ = ascii_image(&[0.0; 3], 2, 2);
    }

    #[test]
    fn probability_bars_marks_the_argmax() {
        let labels: Vec<String> = vec!["0".into(), "1".into(), "2".into()];
        let chart = probability_bars(&[0.1, 0.7, 0.2], &labels);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with('◀'));
        assert!(!lines[0].ends_with('◀'));
        assert!(lines[1].contains("70.0%"));
    }
}
