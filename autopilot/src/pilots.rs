//! Scripted pilots. A pilot reads the public world state each tick and
//! produces one input frame; it never reaches into the simulation.

use apocalypse_core::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use apocalypse_core::geometry::{distance, shortest_angle_diff};
use apocalypse_core::{InputFrame, World};

pub trait Pilot: Send {
    fn id(&self) -> &'static str;
    fn describe(&self) -> &'static str;
    fn decide(&mut self, world: &World, tick: u32) -> InputFrame;
}

/// Never touches the controls. Baseline for how long the field takes to
/// kill a stationary ship.
pub struct Idle;

impl Pilot for Idle {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn describe(&self) -> &'static str {
        "No input at all; measures field lethality."
    }

    fn decide(&mut self, _world: &World, _tick: u32) -> InputFrame {
        InputFrame::default()
    }
}

/// Spins in place with the trigger held. Scores off whatever crosses the
/// muzzle.
pub struct Turret;

impl Pilot for Turret {
    fn id(&self) -> &'static str {
        "turret"
    }

    fn describe(&self) -> &'static str {
        "Holds position, rotates continuously, fires nonstop."
    }

    fn decide(&mut self, _world: &World, _tick: u32) -> InputFrame {
        InputFrame::held(true, false, false, true)
    }
}

/// Thrusts in bursts while spinning and firing; keeps moving to shake
/// missiles and the tractor beam.
pub struct Drifter;

impl Pilot for Drifter {
    fn id(&self) -> &'static str {
        "drifter"
    }

    fn describe(&self) -> &'static str {
        "Burst thrust on a duty cycle with constant spin-and-fire."
    }

    fn decide(&mut self, _world: &World, tick: u32) -> InputFrame {
        let thrust = tick % 120 < 30;
        InputFrame::held(tick % 11 < 6, false, thrust, true)
    }
}

/// Turns toward the nearest rock (torus-aware) and fires when roughly
/// aligned.
pub struct Hunter;

impl Hunter {
    /// Shortest separation on the torus, as the delta to add to `from`.
    fn torus_delta(from: f64, to: f64, extent: f64) -> f64 {
        let mut d = to - from;
        if d > extent / 2.0 {
            d -= extent;
        } else if d < -extent / 2.0 {
            d += extent;
        }
        d
    }
}

impl Pilot for Hunter {
    fn id(&self) -> &'static str {
        "hunter"
    }

    fn describe(&self) -> &'static str {
        "Aims at the nearest asteroid and fires when lined up."
    }

    fn decide(&mut self, world: &World, _tick: u32) -> InputFrame {
        let ship = &world.ship;
        let nearest = world
            .asteroids
            .iter()
            .min_by(|a, b| {
                distance((ship.x, ship.y), (a.x, a.y))
                    .total_cmp(&distance((ship.x, ship.y), (b.x, b.y)))
            })
            .map(|a| (a.x, a.y));

        let Some((tx, ty)) = nearest else {
            return InputFrame::default();
        };

        let dx = Self::torus_delta(ship.x, tx, WORLD_WIDTH);
        let dy = Self::torus_delta(ship.y, ty, WORLD_HEIGHT);
        // Ship headings are degrees with screen-y inverted.
        let desired = (-dy).atan2(dx);
        let diff = shortest_angle_diff(ship.angle.to_radians(), desired);

        let aligned = diff.abs() < 0.12;
        InputFrame::held(diff > 0.0 && !aligned, diff < 0.0 && !aligned, false, aligned)
    }
}

pub fn pilot_ids() -> Vec<&'static str> {
    vec!["idle", "turret", "drifter", "hunter"]
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot>> {
    match id {
        "idle" => Some(Box::new(Idle)),
        "turret" => Some(Box::new(Turret)),
        "drifter" => Some(Box::new(Drifter)),
        "hunter" => Some(Box::new(Hunter)),
        _ => None,
    }
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    pilot_ids()
        .into_iter()
        .map(|id| {
            let pilot = create_pilot(id).expect("roster id");
            (pilot.id(), pilot.describe())
        })
        .collect()
}
