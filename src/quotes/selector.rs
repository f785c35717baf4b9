use rand::Rng;

use super::types::Quote;

/// Combined text and author length that fits the widget
pub const MAX_DISPLAY_LEN: usize = 140;

/// Sampling attempts before settling for a long quote
pub const MAX_ATTEMPTS: usize = 15;

/// Pick a random quote that fits the display, using the thread RNG
pub fn select_displayable(quotes: &[Quote]) -> Quote {
    select_displayable_with(quotes, &mut rand::rng())
}

/// Pick a random quote that fits the display
///
/// Samples uniformly up to [`MAX_ATTEMPTS`] times looking for one within
/// [`MAX_DISPLAY_LEN`]; otherwise the last sample is returned anyway. Empty
/// input yields [`Quote::fallback`].
pub fn select_displayable_with<R: Rng + ?Sized>(quotes: &[Quote], rng: &mut R) -> Quote {
    if quotes.is_empty() {
        return Quote::fallback();
    }

    let mut picked = &quotes[0];
    for _ in 0..MAX_ATTEMPTS {
        picked = &quotes[rng.random_range(0..quotes.len())];
        if picked.display_len() <= MAX_DISPLAY_LEN {
            break;
        }
    }

    picked.clone()
}
