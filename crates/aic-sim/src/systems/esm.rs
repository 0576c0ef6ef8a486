//! Passive emitter detection.
//!
//! Unlike radar and IFF, ESM is not sweep-gated and not range-gated:
//! contacts refresh continuously while an emitter radiates, and persist
//! inactive once it stops so the operator can still read the bearing age.
//! Serial numbers increase monotonically for the session and are never
//! reused; disabling ESM clears the store and resets the counter.

use hecs::World;

use aic_core::components::{AssetId, AssetInfo, EmitterSwitches, OwnShip};
use aic_core::contacts::DetectedEmitter;
use aic_core::geo::{self, Geo};
use aic_core::platform::PlatformCatalog;

/// Contact store owned by the engine across ticks.
#[derive(Debug, Clone)]
pub struct EsmStore {
    pub contacts: Vec<DetectedEmitter>,
    next_serial: u32,
}

impl Default for EsmStore {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            next_serial: 1,
        }
    }
}

impl EsmStore {
    /// Full reset: drops all contacts and restarts the serial sequence.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.next_serial = 1;
    }
}

/// Upsert one contact per radiating (asset, emitter) pair.
pub fn run(world: &World, catalog: &PlatformCatalog, tick: u64, store: &mut EsmStore) {
    let Some(own) = crate::systems::radar::own_ship_fix(world) else {
        return;
    };

    // Contacts not re-observed this tick stay flagged inactive.
    for contact in &mut store.contacts {
        contact.active = false;
    }

    let mut query = world
        .query::<(&AssetId, &AssetInfo, &Geo, &EmitterSwitches)>()
        .without::<&OwnShip>();
    for (_entity, (id, info, pos, switches)) in query.iter() {
        let Some(platform) = info
            .platform
            .as_deref()
            .and_then(|name| catalog.get(info.domain, name))
        else {
            continue;
        };

        for emitter in &platform.emitters {
            if !switches.on.get(emitter).copied().unwrap_or(false) {
                continue;
            }

            let bearing_deg = geo::bearing(&own.pos, pos);
            match store
                .contacts
                .iter_mut()
                .find(|c| c.asset_id == *id && c.emitter == *emitter)
            {
                Some(contact) => {
                    contact.bearing_deg = bearing_deg;
                    contact.pos = *pos;
                    contact.last_seen_tick = tick;
                    contact.active = true;
                }
                None => {
                    let serial = store.next_serial;
                    store.next_serial += 1;
                    store.contacts.push(DetectedEmitter {
                        serial,
                        asset_id: *id,
                        emitter: emitter.clone(),
                        bearing_deg,
                        pos: *pos,
                        last_seen_tick: tick,
                        active: true,
                        visible: true,
                    });
                }
            }
        }
    }
}
