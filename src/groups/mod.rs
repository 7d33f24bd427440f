/// Safe-prime group parameters and their randomized generation.
pub mod safe_prime;

pub use safe_prime::{
    generate_pedersen_group, generate_safe_prime_group, satisfies_generator_predicate,
    GroupParameters,
};
