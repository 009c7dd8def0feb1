//! Argument powerset expansion
//!
//! A command with optional arguments is offered once per admissible subset of
//! those arguments: `\sqrt` and `\sqrt[root]` are two candidate rows. The
//! expansion enumerates subsets by ascending bitmask over the optional
//! argument positions, so output order is stable across calls and the subset
//! index doubles as the candidate's variant index (index 0 is always the
//! all-required variant).

use texcomp_lang::Argument;

/// Lazy iterator over the optional-argument subsets of an argument list.
///
/// Each item is the full argument sequence for one variant: required
/// arguments at their source positions, plus the optional arguments selected
/// by the current subset. For `n` optional arguments the iterator yields
/// exactly `2^n` items; for 64 or more the subset count saturates at
/// `u64::MAX` instead of overflowing.
#[derive(Debug, Clone)]
pub struct OptionalPowerset {
    arguments: Vec<Argument>,
    mask: u64,
    count: u64,
}

impl Iterator for OptionalPowerset {
    type Item = Vec<Argument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask >= self.count {
            return None;
        }
        let mask = self.mask;
        self.mask += 1;

        let mut variant = Vec::with_capacity(self.arguments.len());
        let mut bit = 0;
        for argument in &self.arguments {
            if argument.is_optional() {
                // Optional positions past the mask width are never selected
                if bit < u64::BITS && mask & (1u64 << bit) != 0 {
                    variant.push(argument.clone());
                }
                bit += 1;
            } else {
                variant.push(argument.clone());
            }
        }
        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.mask) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OptionalPowerset {}

/// Expand an ordered argument list into one sequence per subset of its
/// optional arguments, ascending by subset bitmask.
///
/// Zero optional arguments yield exactly one output: the required arguments
/// as given. Total over any finite list; no error conditions.
pub fn optional_powerset(arguments: &[Argument]) -> OptionalPowerset {
    let optional = arguments.iter().filter(|a| a.is_optional()).count();
    OptionalPowerset {
        arguments: arguments.to_vec(),
        mask: 0,
        // Saturate for 64+ optional arguments; the subset count exceeds any
        // list a caller could consume anyway.
        count: 1u64.checked_shl(optional as u32).unwrap_or(u64::MAX),
    }
}
