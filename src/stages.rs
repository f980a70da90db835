/// Gallows drawings, one per incorrect guess, with the full figure last.
const CLASSIC_STAGES: [&str; 8] = [
    r"
   +---+
       |
       |
       |
       |
       |
   =====",
    r"
   +---+
   |   |
       |
       |
       |
       |
   =====",
    r"
   +---+
   |   |
   O   |
       |
       |
       |
   =====",
    r"
   +---+
   |   |
   O   |
   |   |
       |
       |
   =====",
    r"
   +---+
   |   |
   O   |
  /|   |
       |
       |
   =====",
    r"
   +---+
   |   |
   O   |
  /|\  |
       |
       |
   =====",
    r"
   +---+
   |   |
   O   |
  /|\  |
  /    |
       |
   =====",
    r"
   +---+
   |   |
   O   |
  /|\  |
  / \  |
       |
   =====",
];

/// Immutable set of drawings handed to whichever interface renders the round.
#[derive(Debug, Clone)]
pub struct StageArt {
    stages: Vec<&'static str>,
}

impl StageArt {
    pub fn classic() -> Self {
        Self {
            stages: CLASSIC_STAGES.to_vec(),
        }
    }

    /// Drawing for a round in progress with `incorrect` misses.
    pub fn stage(&self, incorrect: usize) -> &'static str {
        let last = self.stages.len() - 1;
        self.stages[incorrect.min(last)]
    }

    /// Drawing shown once the round is lost.
    pub fn final_stage(&self) -> &'static str {
        self.stages[self.stages.len() - 1]
    }
}

impl Default for StageArt {
    fn default() -> Self {
        Self::classic()
    }
}
