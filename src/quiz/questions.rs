//! Question bank: two questions per axis, one option per letter.

use super::scorer::Polarity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [(&'static str, Polarity); 2],
}

pub const QUESTIONS: [Question; 8] = [
    // E vs I
    Question {
        prompt: "What recharges you more on a weekend?",
        options: [
            ("Hanging out with people, the livelier the better 🎉", Polarity::E),
            ("Quiet time alone to unwind ☕️", Polarity::I),
        ],
    },
    Question {
        prompt: "At a new gathering, I usually…",
        options: [
            ("Start conversations and liven things up 🗣️", Polarity::E),
            ("Watch first and warm up slowly 👀", Polarity::I),
        ],
    },
    // S vs N
    Question {
        prompt: "When I take in information, I prefer…",
        options: [
            ("Facts and experience, concrete details 📋", Polarity::S),
            ("Ideas and possibilities, the big picture 🌈", Polarity::N),
        ],
    },
    Question {
        prompt: "How do I read a manual?",
        options: [
            ("Step by step, in order ✅", Polarity::S),
            ("Skim it and go with my gut 🪄", Polarity::N),
        ],
    },
    // T vs F
    Question {
        prompt: "In a conflict, I first…",
        options: [
            ("Lay out causes and fixes logically 🧠", Polarity::T),
            ("Consider how the other person feels 💗", Polarity::F),
        ],
    },
    Question {
        prompt: "Which matters more to me?",
        options: [
            ("Precise feedback, improvement first 🔧", Polarity::T),
            ("Encouragement, the mood first 🌟", Polarity::F),
        ],
    },
    // J vs P
    Question {
        prompt: "How do I plan a trip?",
        options: [
            ("A tight itinerary, plans put me at ease 🗓️", Polarity::J),
            ("Improvise on the spot, flexibility wins 🎒", Polarity::P),
        ],
    },
    Question {
        prompt: "When a deadline approaches…",
        options: [
            ("Finish early and relax ✅", Polarity::J),
            ("Last-minute focus, deadline power 🚀", Polarity::P),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Axis;

    #[test]
    fn test_two_questions_per_axis() {
        for axis in Axis::ALL {
            let count = QUESTIONS
                .iter()
                .filter(|q| q.options.iter().all(|(_, p)| p.axis() == axis))
                .count();
            assert_eq!(count, 2, "{:?}", axis);
        }
    }

    #[test]
    fn test_options_cover_both_letters() {
        for q in &QUESTIONS {
            assert_ne!(q.options[0].1, q.options[1].1, "{}", q.prompt);
            assert_eq!(q.options[0].1, q.options[0].1.axis().canonical());
        }
    }
}
