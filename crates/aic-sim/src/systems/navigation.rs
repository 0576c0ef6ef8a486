//! Waypoint-queue navigation.
//!
//! Runs after position integration each tick. Only the head of the queue is
//! an active target; reaching it within the capture radius pops it and
//! retargets the heading toward the next waypoint, or clears the heading
//! target when the queue empties (the asset holds its last heading).

use hecs::World;

use aic_core::components::{Kinematics, NavRoute};
use aic_core::constants::WAYPOINT_CAPTURE_NM;
use aic_core::geo::{self, Geo};

pub fn run(world: &mut World) {
    for (_entity, (kin, pos, route)) in
        world.query_mut::<(&mut Kinematics, &Geo, &mut NavRoute)>()
    {
        let Some(head) = route.waypoints.front().copied() else {
            continue;
        };

        if geo::distance_nm(pos, &head) < WAYPOINT_CAPTURE_NM {
            route.waypoints.pop_front();
            kin.target_heading = route
                .waypoints
                .front()
                .map(|next| geo::bearing(pos, next));
        }
    }
}
