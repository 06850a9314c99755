use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Synthesized presentation metadata attached to each feed item. These are
/// display placeholders only; nothing here derives from a verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub author: String,
    pub avatar_url: String,
    pub like_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
    pub timestamp_label: String,
}

/// Source of display personas. Injectable so feed tests stay deterministic.
pub trait PersonaSynth {
    fn next_persona(&mut self) -> Persona;
}

pub struct RngPersonaSynth<R> {
    rng: R,
}

impl<R: Rng> RngPersonaSynth<R> {
    pub fn new(rng: R) -> Self {
        RngPersonaSynth { rng }
    }
}

impl RngPersonaSynth<SmallRng> {
    pub fn from_entropy() -> Self {
        RngPersonaSynth::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> PersonaSynth for RngPersonaSynth<R> {
    fn next_persona(&mut self) -> Persona {
        Persona {
            author: format!("User_{}", self.rng.gen_range(0..1000)),
            avatar_url: format!("https://i.pravatar.cc/150?img={}", self.rng.gen_range(0..70)),
            like_count: self.rng.gen_range(0..5000),
            comment_count: self.rng.gen_range(0..500),
            share_count: self.rng.gen_range(0..1000),
            timestamp_label: format!("{} hours ago", self.rng.gen_range(0..24)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_synth_is_reproducible() {
        let mut a = RngPersonaSynth::new(SmallRng::seed_from_u64(7));
        let mut b = RngPersonaSynth::new(SmallRng::seed_from_u64(7));
        assert_eq!(a.next_persona(), b.next_persona());
        assert_eq!(a.next_persona(), b.next_persona());
    }

    #[test]
    fn persona_fields_stay_in_range() {
        let mut synth = RngPersonaSynth::new(SmallRng::seed_from_u64(42));
        for _ in 0..100 {
            let persona = synth.next_persona();
            let suffix: u32 = persona.author.strip_prefix("User_").unwrap().parse().unwrap();
            assert!(suffix < 1000);
            assert!(persona.avatar_url.starts_with("https://i.pravatar.cc/150?img="));
            assert!(persona.like_count < 5000);
            assert!(persona.comment_count < 500);
            assert!(persona.share_count < 1000);
            assert!(persona.timestamp_label.ends_with(" hours ago"));
        }
    }
}
