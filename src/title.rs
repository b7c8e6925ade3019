//! Animated "PADDLETOPIA" banner: per-letter hue and a wave that travels
//! left to right.

use crate::math::hsv_to_rgb;

pub const TITLE: &str = "PADDLETOPIA";
/// Seconds for one full wave loop
pub const WAVE_PERIOD: f32 = 2.5;
/// Peak upward offset in logical pixels
pub const WAVE_AMPLITUDE: f32 = 25.0;
const HUE_STEP: u32 = 20;

/// (position in [0, 1], vertical offset in pixels); negative is up
type Keyframe = (f32, f32);

/// Keyframes for letter `index` across one loop
fn keyframes(index: usize) -> [Keyframe; 4] {
    let peak = 5.0 * index as f32;
    [
        ((peak - 10.0).max(0.0) / 100.0, 0.0),
        (peak / 100.0, -WAVE_AMPLITUDE),
        ((peak + 10.0) / 100.0, 0.0),
        (1.0, 0.0),
    ]
}

/// Linear interpolation through keyframes sorted by position
///
/// Keyframes sharing a position resolve to the later one.
fn sample(frames: &[Keyframe], t: f32) -> f32 {
    let Some(&(_, first)) = frames.first() else {
        return 0.0;
    };
    let mut previous: Option<Keyframe> = None;

    for &(position, value) in frames {
        if position > t {
            return match previous {
                Some((p0, v0)) if position > p0 => v0 + (value - v0) * (t - p0) / (position - p0),
                Some((_, v0)) => v0,
                None => first,
            };
        }
        previous = Some((position, value));
    }
    previous.map_or(first, |(_, value)| value)
}

/// Vertical offset of letter `index` at `time` seconds
pub fn letter_offset(index: usize, time: f32) -> f32 {
    let t = (time / WAVE_PERIOD).rem_euclid(1.0);
    sample(&keyframes(index), t)
}

/// sRGB display color of letter `index`, channels in [0, 1]
pub fn letter_color(index: usize) -> [f32; 3] {
    let hue = (index as u32 * HUE_STEP) % 360;
    hsv_to_rgb(hue as f32 / 360.0, 1.0, 1.0)
}

/// One positioned letter of the banner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letter {
    pub glyph: char,
    pub offset: f32,
    pub color: [f32; 3],
}

/// Every letter of the title at `time` seconds
pub fn letters(time: f32) -> impl Iterator<Item = Letter> {
    TITLE.chars().enumerate().map(move |(i, glyph)| Letter {
        glyph,
        offset: letter_offset(i, time),
        color: letter_color(i),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_percent(index: usize, percent: f32) -> f32 {
        letter_offset(index, WAVE_PERIOD * percent / 100.0)
    }

    #[test]
    fn first_letter_starts_at_peak() {
        assert_eq!(at_percent(0, 0.0), -WAVE_AMPLITUDE);
        assert!((at_percent(0, 5.0) + 12.5).abs() < 1e-3);
        assert_eq!(at_percent(0, 10.0), 0.0);
        assert_eq!(at_percent(0, 60.0), 0.0);
    }

    #[test]
    fn later_letters_peak_later() {
        // Letter 4 rises from 10% to 20% and falls by 30%
        assert_eq!(at_percent(4, 5.0), 0.0);
        assert!((at_percent(4, 15.0) + 12.5).abs() < 1e-3);
        assert!((at_percent(4, 20.0) + WAVE_AMPLITUDE).abs() < 1e-3);
        assert!(at_percent(4, 30.0).abs() < 1e-3);

        // Last letter peaks at 50%
        assert!((at_percent(10, 50.0) + WAVE_AMPLITUDE).abs() < 1e-3);
    }

    #[test]
    fn wave_loops() {
        for i in 0..TITLE.len() {
            let a = letter_offset(i, 0.7);
            let b = letter_offset(i, 0.7 + WAVE_PERIOD);
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn hues_step_by_twenty_degrees() {
        assert_eq!(letter_color(0), [1.0, 0.0, 0.0]);
        // 120 degrees is pure green
        let green = letter_color(6);
        assert!(green[1] > 0.99 && green[0] < 0.01 && green[2] < 0.01);
        assert_eq!(letters(0.0).count(), 11);
    }
}
