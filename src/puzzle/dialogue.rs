//! Scripted exchanges between the product-holder and the sum-holder

use super::{Attribute, CandidateSet, Claim};
use crate::error::{PuzzleError, Result};
use std::fmt;
use std::str::FromStr;

/// One of the two parties in the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// Told the product
    Pete,
    /// Told the sum
    Susan,
}

impl Speaker {
    pub fn attribute(self) -> Attribute {
        match self {
            Speaker::Pete => Attribute::Product,
            Speaker::Susan => Attribute::Sum,
        }
    }
}

/// A single answer to "do you know the pair?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub speaker: Speaker,
    pub claim: Claim,
}

impl Statement {
    pub fn new(speaker: Speaker, claim: Claim) -> Self {
        Self { speaker, claim }
    }

    /// Narrow `candidates` to the pairs consistent with this answer
    pub fn apply(&self, candidates: &CandidateSet) -> CandidateSet {
        candidates.filter_by_knowledge(self.speaker.attribute(), self.claim)
    }
}

impl FromStr for Statement {
    type Err = PuzzleError;

    /// Parse `speaker:answer`, e.g. `pete:no`, `s:yes`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PuzzleError::InvalidStatement(s.to_string());
        let (speaker, answer) = s.split_once(':').ok_or_else(invalid)?;

        let speaker = match speaker.trim().to_ascii_lowercase().as_str() {
            "pete" | "p" | "product" => Speaker::Pete,
            "susan" | "s" | "sum" => Speaker::Susan,
            _ => return Err(invalid()),
        };
        let claim = match answer.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Claim::Knows,
            "no" | "n" => Claim::DoesNotKnow,
            _ => return Err(invalid()),
        };

        Ok(Self { speaker, claim })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.speaker {
            Speaker::Pete => "pete",
            Speaker::Susan => "susan",
        };
        write!(f, "{}:{}", speaker, self.claim)
    }
}

/// An ordered script of statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogue {
    statements: Vec<Statement>,
}

impl Dialogue {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// `rounds` rounds of both parties saying they do not know
    pub fn alternating_denials(rounds: usize) -> Self {
        let mut dialogue = Self::default();
        for _ in 0..rounds {
            dialogue = dialogue
                .then(Speaker::Pete, Claim::DoesNotKnow)
                .then(Speaker::Susan, Claim::DoesNotKnow);
        }
        dialogue
    }

    /// Append a statement
    pub fn then(mut self, speaker: Speaker, claim: Claim) -> Self {
        self.statements.push(Statement::new(speaker, claim));
        self
    }

    /// Parse a script from statement tokens
    pub fn parse<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let statements = tokens
            .into_iter()
            .map(|token| token.as_ref().parse())
            .collect::<Result<Vec<Statement>>>()?;
        Ok(Self { statements })
    }

    /// Replay every statement in order against `candidates`
    pub fn apply(&self, candidates: &CandidateSet) -> CandidateSet {
        self.statements
            .iter()
            .fold(candidates.clone(), |set, statement| statement.apply(&set))
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
