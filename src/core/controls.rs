//! Control binder for the flocking parameter panel
//!
//! Every parameter is shown twice: a coarse slider and a precise numeric field.
//! Two separate entry points keep server pushes from looking like user edits:
//!
//! - [`ControlBinder::apply_server`] only writes display values and never yields
//!   anything to send.
//! - [`ControlBinder::on_user_input`] syncs the sibling control and returns the
//!   full parameter set that must go out as `UpdateParameters`.

use std::ops::RangeInclusive;

use super::protocol::FlockingParameters;
use tracing::debug;

/// One of the nine tunable values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    MaxSpeed,
    ObstacleAvoidanceDistance,
    ObstacleAvoidanceStrength,
    SeparationDistance,
    SeparationStrength,
    AlignmentDistance,
    AlignmentStrength,
    CohesionDistance,
    CohesionStrength,
}

impl Param {
    pub const ALL: &'static [Param] = &[
        Param::MaxSpeed,
        Param::ObstacleAvoidanceDistance,
        Param::ObstacleAvoidanceStrength,
        Param::SeparationDistance,
        Param::SeparationStrength,
        Param::AlignmentDistance,
        Param::AlignmentStrength,
        Param::CohesionDistance,
        Param::CohesionStrength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Param::MaxSpeed => "Max speed",
            Param::ObstacleAvoidanceDistance => "Obstacle avoidance distance",
            Param::ObstacleAvoidanceStrength => "Obstacle avoidance strength",
            Param::SeparationDistance => "Separation distance",
            Param::SeparationStrength => "Separation strength",
            Param::AlignmentDistance => "Alignment distance",
            Param::AlignmentStrength => "Alignment strength",
            Param::CohesionDistance => "Cohesion distance",
            Param::CohesionStrength => "Cohesion strength",
        }
    }

    /// Slider range
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Param::MaxSpeed => 0.0..=20.0,
            Param::ObstacleAvoidanceDistance
            | Param::SeparationDistance
            | Param::AlignmentDistance
            | Param::CohesionDistance => 0.0..=300.0,
            Param::ObstacleAvoidanceStrength
            | Param::SeparationStrength
            | Param::AlignmentStrength
            | Param::CohesionStrength => 0.0..=2.0,
        }
    }

    /// Increment for the numeric field
    pub fn step(self) -> f64 {
        match self {
            Param::MaxSpeed => 0.1,
            Param::ObstacleAvoidanceDistance
            | Param::SeparationDistance
            | Param::AlignmentDistance
            | Param::CohesionDistance => 1.0,
            _ => 0.01,
        }
    }

    pub fn get(self, params: &FlockingParameters) -> f32 {
        match self {
            Param::MaxSpeed => params.max_speed,
            Param::ObstacleAvoidanceDistance => params.obstacle_avoidance_distance,
            Param::ObstacleAvoidanceStrength => params.obstacle_avoidance_strength,
            Param::SeparationDistance => params.separation_distance,
            Param::SeparationStrength => params.separation_strength,
            Param::AlignmentDistance => params.alignment_distance,
            Param::AlignmentStrength => params.alignment_strength,
            Param::CohesionDistance => params.cohesion_distance,
            Param::CohesionStrength => params.cohesion_strength,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which of the two linked controls the user touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    Coarse,
    Fine,
}

/// Displayed values of the slider/number pair for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPair {
    pub coarse: f32,
    pub fine: f32,
}

impl ControlPair {
    fn both(value: f32) -> Self {
        Self { coarse: value, fine: value }
    }
}

/// Holds the eighteen displayed control values
#[derive(Debug, Clone)]
pub struct ControlBinder {
    pairs: [ControlPair; 9],
    /// User edits since startup
    user_edits: u64,
}

impl ControlBinder {
    pub fn new(initial: &FlockingParameters) -> Self {
        let mut binder = Self {
            pairs: [ControlPair::both(0.0); 9],
            user_edits: 0,
        };
        binder.write_all(initial);
        binder
    }

    /// Overwrite both controls of every parameter with server values.
    ///
    /// Produces nothing to send.
    pub fn apply_server(&mut self, params: &FlockingParameters) {
        if self.read_parameters() != *params {
            debug!(?params, "Controls updated from server");
        }
        self.write_all(params);
    }

    /// A user edited one control: copy into its sibling and return the full
    /// set to dispatch.
    pub fn on_user_input(
        &mut self,
        param: Param,
        source: ControlSource,
        value: f32,
    ) -> FlockingParameters {
        debug!(?param, ?source, value, "User edited control");
        // The edited control already shows `value`; the sibling follows it
        self.pairs[param.index()] = ControlPair::both(value);
        self.user_edits += 1;
        self.read_parameters()
    }

    pub fn pair(&self, param: Param) -> ControlPair {
        self.pairs[param.index()]
    }

    /// Current set, read fresh from the precise controls
    pub fn read_parameters(&self) -> FlockingParameters {
        let v = |p: Param| self.pairs[p.index()].fine;
        FlockingParameters {
            max_speed: v(Param::MaxSpeed),
            obstacle_avoidance_distance: v(Param::ObstacleAvoidanceDistance),
            obstacle_avoidance_strength: v(Param::ObstacleAvoidanceStrength),
            separation_distance: v(Param::SeparationDistance),
            separation_strength: v(Param::SeparationStrength),
            alignment_distance: v(Param::AlignmentDistance),
            alignment_strength: v(Param::AlignmentStrength),
            cohesion_distance: v(Param::CohesionDistance),
            cohesion_strength: v(Param::CohesionStrength),
        }
    }

    pub fn user_edits(&self) -> u64 {
        self.user_edits
    }

    fn write_all(&mut self, params: &FlockingParameters) {
        for &p in Param::ALL {
            self.pairs[p.index()] = ControlPair::both(p.get(params));
        }
    }
}

impl Default for ControlBinder {
    fn default() -> Self {
        Self::new(&FlockingParameters::default())
    }
}
