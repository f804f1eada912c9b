//! Position Registry: last-known position of every bubble, by list index.
//!
//! Owned by the scene. Per-entity solver calls borrow it through a
//! [`RegistryFrame`] that lives for exactly one frame.

use glam::Vec3;

#[derive(Debug, Clone, Default)]
pub struct PositionRegistry {
    slots: Vec<Option<Vec3>>,
}

impl PositionRegistry {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Recorded position, `None` for an empty or out-of-range slot.
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.slots.get(index).copied().flatten()
    }

    /// Reallocate to `len` empty slots. Nothing from the previous size survives.
    pub fn reset(&mut self, len: usize) {
        self.slots = vec![None; len];
    }

    /// Number of slots holding a position.
    pub fn recorded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Borrow the registry for one frame of solver calls.
    pub fn frame(&mut self) -> RegistryFrame<'_> {
        RegistryFrame {
            slots: &mut self.slots,
        }
    }
}

/// Read/write handle over the registry, scoped to one frame.
pub struct RegistryFrame<'a> {
    slots: &'a mut Vec<Option<Vec3>>,
}

impl<'a> RegistryFrame<'a> {
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.slots.get(index).copied().flatten()
    }

    /// Store `position` at `index`. Out-of-range writes are dropped.
    pub fn record(&mut self, index: usize, position: Vec3) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(position);
                true
            }
            None => false,
        }
    }

    /// Every recorded position except `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .filter_map(|(i, p)| p.map(|p| (i, p)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn out_of_range_reads_are_empty() {
        let reg = PositionRegistry::with_len(2);
        assert_eq!(reg.get(0), None);
        assert_eq!(reg.get(7), None);
    }

    #[test]
    fn reset_drops_every_slot() {
        let mut reg = PositionRegistry::with_len(3);
        {
            let mut f = reg.frame();
            f.record(0, Vec3::X);
            f.record(2, Vec3::Y);
            assert!(!f.record(3, Vec3::Z));
        }
        assert_eq!(reg.recorded(), 2);
        reg.reset(5);
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.recorded(), 0);
    }

    #[test]
    fn neighbors_skip_self_and_empty() {
        let mut reg = PositionRegistry::with_len(4);
        let mut f = reg.frame();
        f.record(0, Vec3::X);
        f.record(1, Vec3::Y);
        f.record(3, Vec3::Z);
        let ids: Vec<usize> = f.neighbors(1).map(|(i, _)| i).collect();
        assert_eq!(ids, vec![0, 3]);
    }

    proptest! {
        #[test]
        fn length_tracks_last_reset(sizes in proptest::collection::vec(0usize..64, 1..20)) {
            let mut reg = PositionRegistry::default();
            for &n in &sizes {
                {
                    let mut f = reg.frame();
                    for i in 0..f.len() {
                        f.record(i, Vec3::splat(i as f32));
                    }
                }
                reg.reset(n);
                prop_assert_eq!(reg.len(), n);
                prop_assert_eq!(reg.recorded(), 0);
                prop_assert_eq!(reg.get(n), None);
            }
        }
    }
}
