//! Cast targeting: turns continuous pointer input into one validated cast.

use super::types::CastTarget;
use crate::config::FishingConstants;
use crate::core::Vec2;
use crate::error::CastRejected;
use crate::world::WaterQuery;

/// Tracks whether the pointer currently rests on a castable spot.
///
/// The engine disables targeting while a session is active; this type only
/// knows about range, water and the rod.
#[derive(Debug, Clone, Default)]
pub struct CastTargeting {
    valid_target: bool,
    last_pointer: Option<Vec2>,
}

impl CastTargeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last pointer sample was a valid target.
    pub fn is_valid_target(&self) -> bool {
        self.valid_target
    }

    pub fn last_pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    /// Range and water checks, shared by pointer samples and clicks.
    pub fn validate<W: WaterQuery + ?Sized>(
        player: Vec2,
        pointer: Vec2,
        water: &W,
        constants: &FishingConstants,
    ) -> Result<CastTarget, CastRejected> {
        let distance = player.distance(pointer);
        if distance > constants.cast_range {
            return Err(CastRejected::OutOfRange {
                distance,
                range: constants.cast_range,
            });
        }
        if !water.is_water_at(pointer) {
            return Err(CastRejected::NotWater {
                x: pointer.x,
                y: pointer.y,
            });
        }
        Ok(CastTarget::from(pointer))
    }

    /// Updates the valid-target flag from a pointer sample and returns it.
    pub fn on_pointer_move<W: WaterQuery + ?Sized>(
        &mut self,
        player: Vec2,
        pointer: Vec2,
        water: &W,
        constants: &FishingConstants,
    ) -> bool {
        self.last_pointer = Some(pointer);
        self.valid_target = Self::validate(player, pointer, water, constants).is_ok();
        self.valid_target
    }

    /// Re-validates at click time and yields the cast target.
    pub fn on_primary_click<W: WaterQuery + ?Sized>(
        &mut self,
        rod_equipped: bool,
        player: Vec2,
        pointer: Vec2,
        water: &W,
        constants: &FishingConstants,
    ) -> Result<CastTarget, CastRejected> {
        if !rod_equipped {
            return Err(CastRejected::NoRod);
        }
        let result = Self::validate(player, pointer, water, constants);
        self.last_pointer = Some(pointer);
        self.valid_target = result.is_ok();
        result
    }

    /// Clears the indicator, e.g. when targeting is disabled.
    pub fn reset(&mut self) {
        self.valid_target = false;
        self.last_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_lake(x: f64, _y: f64) -> bool {
        x >= 100.0
    }

    #[test]
    fn test_pointer_move_sets_flag() {
        let c = FishingConstants::default();
        let mut targeting = CastTargeting::new();

        assert!(targeting.on_pointer_move(Vec2::ZERO, Vec2::new(200.0, 0.0), &east_lake, &c));
        assert!(targeting.is_valid_target());

        assert!(!targeting.on_pointer_move(Vec2::ZERO, Vec2::new(50.0, 0.0), &east_lake, &c));
        assert!(!targeting.is_valid_target());
        assert_eq!(targeting.last_pointer(), Some(Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let c = FishingConstants::default();
        let far = Vec2::new(c.cast_range + 1.0, 0.0);
        let err = CastTargeting::validate(Vec2::ZERO, far, &east_lake, &c).unwrap_err();
        assert!(matches!(err, CastRejected::OutOfRange { .. }));
    }

    #[test]
    fn test_exact_range_is_valid() {
        let c = FishingConstants::default();
        let edge = Vec2::new(c.cast_range, 0.0);
        assert!(CastTargeting::validate(Vec2::ZERO, edge, &east_lake, &c).is_ok());
    }

    #[test]
    fn test_land_rejected() {
        let c = FishingConstants::default();
        let err =
            CastTargeting::validate(Vec2::ZERO, Vec2::new(10.0, 0.0), &east_lake, &c).unwrap_err();
        assert_eq!(err, CastRejected::NotWater { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_click_without_rod_rejected() {
        let c = FishingConstants::default();
        let mut targeting = CastTargeting::new();
        let result = targeting.on_primary_click(false, Vec2::ZERO, Vec2::new(200.0, 0.0), &east_lake, &c);
        assert_eq!(result, Err(CastRejected::NoRod));
    }

    #[test]
    fn test_click_revalidates_instead_of_trusting_flag() {
        let c = FishingConstants::default();
        let mut targeting = CastTargeting::new();
        targeting.on_pointer_move(Vec2::ZERO, Vec2::new(200.0, 0.0), &east_lake, &c);
        assert!(targeting.is_valid_target());

        // Pointer jumped onto land between the sample and the click
        let result = targeting.on_primary_click(true, Vec2::ZERO, Vec2::new(20.0, 0.0), &east_lake, &c);
        assert!(result.is_err());
        assert!(!targeting.is_valid_target());
    }

    #[test]
    fn test_click_yields_target() {
        let c = FishingConstants::default();
        let mut targeting = CastTargeting::new();
        let target = targeting
            .on_primary_click(true, Vec2::ZERO, Vec2::new(250.0, 30.0), &east_lake, &c)
            .unwrap();
        assert_eq!(target, CastTarget { x: 250.0, y: 30.0 });
    }
}
