use std::collections::HashMap;

use super::domain::{Dimension, Language, PersonalityAnswer, PersonalityQuestion, PersonalityType};

const NEUTRAL: i32 = 3;

/// Accumulator slot for a resolved pole. Thinking and Turbulent share the letter `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    E,
    I,
    S,
    N,
    Thinking,
    F,
    J,
    P,
    Assertive,
    Turbulent,
}

#[derive(Debug, Default)]
struct PoleTotals {
    e: u32,
    i: u32,
    s: u32,
    n: u32,
    thinking: u32,
    f: u32,
    j: u32,
    p: u32,
    assertive: u32,
    turbulent: u32,
}

impl PoleTotals {
    fn add(&mut self, bucket: Bucket, magnitude: u32) {
        let slot = match bucket {
            Bucket::E => &mut self.e,
            Bucket::I => &mut self.i,
            Bucket::S => &mut self.s,
            Bucket::N => &mut self.n,
            Bucket::Thinking => &mut self.thinking,
            Bucket::F => &mut self.f,
            Bucket::J => &mut self.j,
            Bucket::P => &mut self.p,
            Bucket::Assertive => &mut self.assertive,
            Bucket::Turbulent => &mut self.turbulent,
        };
        *slot += magnitude;
    }

    fn type_code(&self) -> String {
        let mut code = String::with_capacity(6);
        code.push(if self.e >= self.i { 'E' } else { 'I' });
        code.push(if self.n >= self.s { 'N' } else { 'S' });
        code.push(if self.f >= self.thinking { 'F' } else { 'T' });
        code.push(if self.p >= self.j { 'P' } else { 'J' });
        code.push('-');
        code.push(if self.assertive >= self.turbulent {
            'A'
        } else {
            'T'
        });
        code
    }
}

// `T` pairs with `F`; only `A` resolves to the identity pole `T`.
fn opposite_pole(letter: char) -> Option<char> {
    match letter {
        'I' => Some('E'),
        'E' => Some('I'),
        'S' => Some('N'),
        'N' => Some('S'),
        'T' => Some('F'),
        'F' => Some('T'),
        'J' => Some('P'),
        'P' => Some('J'),
        'A' => Some('T'),
        _ => None,
    }
}

fn bucket_for(letter: char, dimension: Dimension) -> Option<Bucket> {
    match letter {
        'E' => Some(Bucket::E),
        'I' => Some(Bucket::I),
        'S' => Some(Bucket::S),
        'N' => Some(Bucket::N),
        'T' if dimension == Dimension::AT => Some(Bucket::Turbulent),
        'T' => Some(Bucket::Thinking),
        'F' => Some(Bucket::F),
        'J' => Some(Bucket::J),
        'P' => Some(Bucket::P),
        'A' => Some(Bucket::Assertive),
        _ => None,
    }
}

/// Classifies Likert answers into a type such as `INTJ-T`.
///
/// Answers whose question is unknown for `language`, whose value falls outside 1..=5,
/// or which are neutral carry no signal and are skipped. Ties resolve toward
/// E, N, F, P and A, so an empty answer set yields `ENFP-A`.
pub fn classify_personality(
    answers: &[PersonalityAnswer],
    questions: &[PersonalityQuestion],
    language: Language,
) -> PersonalityType {
    let mut catalog: HashMap<u32, &PersonalityQuestion> = HashMap::new();
    for question in questions.iter().filter(|q| q.language == language) {
        catalog.entry(question.id).or_insert(question);
    }

    let mut totals = PoleTotals::default();
    for answer in answers {
        let Some(question) = catalog.get(&answer.question_id) else {
            continue;
        };
        if !(1..=5).contains(&answer.value) {
            continue;
        }

        let signed = answer.value - NEUTRAL;
        if signed == 0 {
            continue;
        }

        let direction = question.direction.to_ascii_uppercase();
        let pole = if signed > 0 {
            Some(direction)
        } else {
            opposite_pole(direction)
        };

        if let Some(bucket) = pole.and_then(|letter| bucket_for(letter, question.dimension)) {
            totals.add(bucket, signed.unsigned_abs());
        }
    }

    PersonalityType(totals.type_code())
}
