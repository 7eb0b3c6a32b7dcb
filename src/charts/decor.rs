//! Cosmetic card decorations. Everything here is a pure function of its input.

use egui::Color32;

const BADGE_POOL: [&str; 28] = [
    "🏖", "🏙", "🏔", "🌋", "🏜", "⛩", "🏰", "🎎", "🌉", "🕌", "🛕", "🗼", "🗽", "🌊", "🌴", "☕",
    "🍜", "🍣", "🥐", "🌮", "🍫", "🍻", "🍵", "🍧", "🍱", "🥟", "🎡", "🎨",
];

const FALLBACK_BADGE: &str = "✨";

const CARD_COLORS: [Color32; 10] = [
    Color32::from_rgb(0xFD, 0xF2, 0xF8),
    Color32::from_rgb(0xEC, 0xFE, 0xFF),
    Color32::from_rgb(0xF0, 0xF9, 0xFF),
    Color32::from_rgb(0xF0, 0xFD, 0xF4),
    Color32::from_rgb(0xFF, 0xF7, 0xED),
    Color32::from_rgb(0xF5, 0xF5, 0xF5),
    Color32::from_rgb(0xFD, 0xF4, 0xFF),
    Color32::from_rgb(0xFE, 0xF2, 0xF2),
    Color32::from_rgb(0xFA, 0xFA, 0xF9),
    Color32::from_rgb(0xEF, 0xF6, 0xFF),
];

// FNV-1a, 64 bit. Stable across runs and platforms, unlike `DefaultHasher`.
fn stable_hash(key: &str) -> u64 {
    key.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Two distinct badges for a key, e.g. a country name.
pub fn badges_for(key: &str) -> [&'static str; 2] {
    let h = stable_hash(key);
    let len = BADGE_POOL.len() as u64;
    let first = BADGE_POOL[(h % len) as usize];
    let second = BADGE_POOL[((h / 7) % len) as usize];
    if first == second {
        [first, FALLBACK_BADGE]
    } else {
        [first, second]
    }
}

pub fn card_color(index: usize) -> Color32 {
    CARD_COLORS[index % CARD_COLORS.len()]
}

/// Medal for the top three, the plain rank after that.
pub fn medal(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("{}.", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges_are_stable_and_distinct() {
        for key in ["Korea, Republic of", "Japan", "Brazil", "", "Côte d'Ivoire"] {
            let a = badges_for(key);
            assert_eq!(a, badges_for(key));
            assert_ne!(a[0], a[1]);
        }
    }

    #[test]
    fn test_stable_hash_known_values() {
        assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_hash("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_card_color_cycles() {
        assert_eq!(card_color(0), card_color(10));
        assert_ne!(card_color(0), card_color(1));
    }

    #[test]
    fn test_medal() {
        assert_eq!(medal(1), "🥇");
        assert_eq!(medal(3), "🥉");
        assert_eq!(medal(7), "7.");
    }
}
