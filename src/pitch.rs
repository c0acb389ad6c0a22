/// Frequency of the reference pitch A4, in hertz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Semitone distance of a natural note from A in the same octave.
///
/// Returns `None` for anything but `A` to `G`, in either case.
#[must_use]
pub const fn semitone_offset(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(-9),
        'D' => Some(-7),
        'E' => Some(-5),
        'F' => Some(-4),
        'G' => Some(-2),
        'A' => Some(0),
        'B' => Some(2),
        _ => None,
    }
}

/// Equal-tempered frequency of a note.
///
/// `accidental` counts semitones up (sharps) or down (flats). Returns `None`
/// for an unknown letter or when the octave or accidental is so far out of
/// range that the interval cannot be computed.
///
/// # Example
/// ```
/// use sythin::pitch::note_to_frequency;
///
/// assert_eq!(note_to_frequency('A', 4, 0), Some(440.0));
/// assert_eq!(note_to_frequency('A', 5, 0), Some(880.0));
/// assert_eq!(note_to_frequency('H', 4, 0), None);
/// ```
#[must_use]
pub fn note_to_frequency(letter: char, octave: i32, accidental: i32) -> Option<f64> {
    let semitones = semitone_offset(letter)?.checked_add(accidental)?;
    let octaves = octave.checked_sub(4)?;
    Some(A4_FREQUENCY * 2f64.powi(octaves) * 2f64.powf(f64::from(semitones) / 12.0))
}

/// Parses a note name such as `A4`, `C#3`, `Bb2` or `f#-1`.
///
/// The letter comes first, then any number of `#` or `b` accidentals, then
/// the octave.
///
/// # Example
/// ```
/// use sythin::pitch::parse_note;
///
/// let c4 = parse_note("C4").unwrap();
/// assert!((c4 - 261.6256).abs() < 1e-3);
/// assert_eq!(parse_note("A#"), None);
/// ```
#[must_use]
pub fn parse_note(text: &str) -> Option<f64> {
    let mut chars = text.trim().chars().peekable();
    let letter = chars.next()?;

    let mut accidental = 0;
    while let Some(&c) = chars.peek() {
        match c {
            '#' => accidental += 1,
            'b' => accidental -= 1,
            _ => break,
        }
        chars.next();
    }

    let octave: i32 = chars.collect::<String>().parse().ok()?;
    note_to_frequency(letter, octave, accidental)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn accidentals_shift_by_semitones() {
        let a_sharp = parse_note("A#4").unwrap();
        let b_flat = parse_note("Bb4").unwrap();
        assert!(close(a_sharp, b_flat));
        assert!(close(a_sharp, 440.0 * 2f64.powf(1.0 / 12.0)));
    }

    #[test]
    fn octaves_double() {
        assert!(close(parse_note("E2").unwrap() * 4.0, parse_note("E4").unwrap()));
        assert!(close(parse_note("a-1").unwrap(), 440.0 / 32.0));
    }

    #[test]
    fn malformed_notes() {
        assert_eq!(parse_note(""), None);
        assert_eq!(parse_note("X4"), None);
        assert_eq!(parse_note("C#x"), None);
    }

    #[test]
    fn extreme_octaves_do_not_overflow() {
        assert_eq!(parse_note("A-2147483648"), None);
        assert_eq!(note_to_frequency('C', i32::MIN, 0), None);
        assert_eq!(note_to_frequency('B', 4, i32::MAX), None);
        assert_eq!(parse_note("A-2147483644"), Some(0.0));
        assert_eq!(parse_note("A2147483647"), Some(f64::INFINITY));
    }
}
