use celestial::{NodeId, SeededRng};
use rulepack::RulePack;

use crate::factory::BodyFactory;

/// State threaded through one generation or edit call.
///
/// Owns the call's single random stream; every stochastic choice draws
/// from `rng` in a fixed order.
pub struct GenerationContext<'a> {
    pub pack: &'a RulePack,
    pub rng: SeededRng,
    pub factory: BodyFactory,
    pub age_gyr: f64,
    /// Toytown factor, already guarded
    pub scale: f64,
}

impl<'a> GenerationContext<'a> {
    pub fn new(pack: &'a RulePack, rng: SeededRng, age_gyr: f64, scale: f64) -> Self {
        Self {
            pack,
            rng,
            factory: BodyFactory::new(),
            age_gyr,
            scale,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.factory.next_id(&mut self.rng)
    }
}
