//! Test Record Generator
//!
//! Emits random in-domain driver records for exercising the predictor:
//! JSON lines by default, or raw form answers (one value per line) with
//! `--answers` for piping straight into the interactive session.

use driver_churn_predictor::form::{FieldDomain, FIELDS};
use driver_churn_predictor::types::driver::{DriverRecord, FIELD_COUNT};
use rand::Rng;

/// Record generator sampling every field inside its form domain
struct RecordGenerator {
    rng: rand::rngs::ThreadRng,
}

impl RecordGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate one random in-domain record
    fn generate(&mut self) -> DriverRecord {
        let mut values = [0_i64; FIELD_COUNT];
        for (index, field) in FIELDS.iter().enumerate() {
            values[index] = self.sample(&field.domain);
        }
        DriverRecord::from_inputs(values)
    }

    /// Generate the raw form answers for one record
    fn generate_answers(&mut self) -> Vec<i64> {
        FIELDS.iter().map(|field| self.sample(&field.domain)).collect()
    }

    fn sample(&mut self, domain: &FieldDomain) -> i64 {
        match domain {
            FieldDomain::Range { min, max } => self.rng.gen_range(*min..=*max),
            FieldDomain::Choices(choices) => choices[self.rng.gen_range(0..choices.len())],
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let answers_mode = args.iter().any(|a| a == "--answers");
    let count: usize = args
        .iter()
        .find_map(|a| a.parse().ok())
        .unwrap_or(5);

    let mut generator = RecordGenerator::new();

    for _ in 0..count {
        if answers_mode {
            for value in generator.generate_answers() {
                println!("{}", value);
            }
        } else {
            let record = generator.generate();
            match serde_json::to_string(&record) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize record: {}", e),
            }
        }
    }
}
