// dispatch.rs - Merge-join walk of a system over the sorted stores
//
// Every dynamic slot holds a cursor into its store. Each step reads the
// cursor heads: required slots are leap-frogged to the largest required head
// until they agree, and with no required slots the smallest optional head
// wins. A match fans out over the cross product of the static slots and then
// consumes every record of the entity from every cursor.

use crate::ecs::storage::Stores;
use crate::ecs::{
    CoreError, EntityId, Head, Signature, SlotKind, System, SystemDescriptor,
};

/// Counts reported by a finished walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Entities that satisfied the signature.
    pub matched: usize,
    /// Calls to `execute`, including static fan-out.
    pub invocations: usize,
}

enum Step {
    Done,
    Seek(EntityId),
    Match(EntityId),
}

fn next_step(kinds: &[SlotKind], heads: &[Head]) -> Step {
    let mut required = None::<(EntityId, EntityId)>;
    let mut optional = None::<EntityId>;

    for (kind, head) in kinds.iter().zip(heads) {
        match (*head, kind.is_required()) {
            (Head::Static, _) | (Head::Exhausted, false) => {}
            (Head::Exhausted, true) => return Step::Done,
            (Head::At(e), true) => {
                required = Some(match required {
                    Some((lo, hi)) => (lo.min(e), hi.max(e)),
                    None => (e, e),
                });
            }
            (Head::At(e), false) => {
                optional = Some(optional.map_or(e, |m| m.min(e)));
            }
        }
    }

    match required {
        Some((lo, hi)) if lo == hi => Step::Match(lo),
        Some((_, hi)) => Step::Seek(hi),
        None => optional.map_or(Step::Done, Step::Match),
    }
}

/// Step a mixed-radix counter, last digit fastest. Returns `false` once it
/// wraps back to all zeros.
fn advance_odometer(coords: &mut [usize], lens: &[usize]) -> bool {
    for (digit, &len) in coords.iter_mut().zip(lens).rev() {
        *digit += 1;
        if *digit < len {
            return true;
        }
        *digit = 0;
    }
    false
}

struct Prepared<'w, Sig: Signature> {
    name: String,
    fetch: Sig::Fetch<'w>,
    kinds: Vec<SlotKind>,
    lens: Vec<usize>,
    /// Odometer digits, one per static slot. Reset for each matched entity.
    coords: Vec<usize>,
}

/// Validate the signature and open every store it names. `None` when the
/// signature has nothing to join on.
fn prepare<'w, S: System>(
    stores: &'w Stores,
    system: &S,
) -> Result<Option<Prepared<'w, S::Signature>>, CoreError> {
    let name = system.name().into_owned();
    let descriptor = SystemDescriptor::new(name, S::Signature::slots());
    descriptor.validate()?;

    let fetch = S::Signature::fetch(stores, descriptor.name())?;
    if !descriptor.has_dynamic() {
        tracing::warn!(
            system = descriptor.name(),
            "signature has no dynamic slots, walk visits nothing"
        );
        return Ok(None);
    }

    let mut lens = Vec::new();
    S::Signature::static_lens(&fetch, &mut lens);
    let kinds = descriptor.slots().iter().map(|slot| slot.kind).collect();
    let coords = vec![0; lens.len()];

    Ok(Some(Prepared {
        name: descriptor.name().to_owned(),
        fetch,
        kinds,
        lens,
        coords,
    }))
}

/// Call `execute` once per static combination for a matched entity.
fn fan_out<'w, S: System>(
    system: &mut S,
    prepared: &mut Prepared<'w, S::Signature>,
    entity: EntityId,
) -> Result<usize, CoreError> {
    prepared.coords.fill(0);
    let mut calls = 0;
    loop {
        let Some(item) = S::Signature::item(&prepared.fetch, entity, &prepared.coords) else {
            // Cursors are aligned on `entity` before fan-out starts.
            return Ok(calls);
        };
        system
            .execute(entity, item)
            .map_err(|source| CoreError::UserHookFailure {
                system: prepared.name.clone(),
                source,
            })?;
        calls += 1;
        if !advance_odometer(&mut prepared.coords, &prepared.lens) {
            return Ok(calls);
        }
    }
}

pub(crate) fn walk<S: System>(stores: &Stores, system: &mut S) -> Result<WalkSummary, CoreError> {
    let mut summary = WalkSummary::default();
    let Some(mut prepared) = prepare(stores, system)? else {
        return Ok(summary);
    };

    let mut heads = Vec::with_capacity(prepared.kinds.len());
    loop {
        heads.clear();
        S::Signature::heads(&prepared.fetch, &mut heads);
        let entity = match next_step(&prepared.kinds, &heads) {
            Step::Done => break,
            Step::Seek(target) => {
                S::Signature::seek(&mut prepared.fetch, target);
                continue;
            }
            Step::Match(entity) => entity,
        };

        // Brings optional cursors up to the matched entity.
        S::Signature::seek(&mut prepared.fetch, entity);
        let calls = fan_out(system, &mut prepared, entity)?;
        tracing::trace!(system = %prepared.name, entity, calls, "matched entity");
        summary.matched += 1;
        summary.invocations += calls;
        S::Signature::consume(&mut prepared.fetch, entity);
    }

    tracing::debug!(
        system = %prepared.name,
        matched = summary.matched,
        invocations = summary.invocations,
        "walk finished"
    );
    Ok(summary)
}

pub(crate) fn walk_entity<S: System>(
    stores: &Stores,
    entity: EntityId,
    system: &mut S,
) -> Result<Option<usize>, CoreError> {
    let Some(mut prepared) = prepare(stores, system)? else {
        return Ok(None);
    };

    S::Signature::seek(&mut prepared.fetch, entity);
    let mut heads = Vec::with_capacity(prepared.kinds.len());
    S::Signature::heads(&prepared.fetch, &mut heads);
    match next_step(&prepared.kinds, &heads) {
        Step::Match(e) if e == entity => {
            let calls = fan_out(system, &mut prepared, entity)?;
            tracing::trace!(system = %prepared.name, entity, calls, "walked single entity");
            Ok(Some(calls))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(kinds: &[SlotKind], heads: &[Head]) -> Option<Result<EntityId, EntityId>> {
        match next_step(kinds, heads) {
            Step::Done => None,
            Step::Match(e) => Some(Ok(e)),
            Step::Seek(e) => Some(Err(e)),
        }
    }

    #[test]
    fn required_heads_leapfrog_to_the_largest() {
        use SlotKind::*;
        let kinds = [Required, Optional, Required];
        assert_eq!(
            step(&kinds, &[Head::At(2), Head::At(1), Head::At(5)]),
            Some(Err(5))
        );
        assert_eq!(
            step(&kinds, &[Head::At(5), Head::At(1), Head::At(5)]),
            Some(Ok(5))
        );
        assert_eq!(
            step(&kinds, &[Head::At(5), Head::At(1), Head::Exhausted]),
            None
        );
    }

    #[test]
    fn optional_only_takes_the_smallest_head() {
        use SlotKind::*;
        let kinds = [Static, Optional, Optional];
        assert_eq!(
            step(&kinds, &[Head::Static, Head::At(9), Head::At(4)]),
            Some(Ok(4))
        );
        assert_eq!(
            step(&kinds, &[Head::Static, Head::Exhausted, Head::At(4)]),
            Some(Ok(4))
        );
        assert_eq!(
            step(&kinds, &[Head::Static, Head::Exhausted, Head::Exhausted]),
            None
        );
    }

    #[test]
    fn odometer_visits_lexicographic_cross_product() {
        let lens = [2, 3];
        let mut coords = [0, 0];
        let mut seen = vec![coords];
        while advance_odometer(&mut coords, &lens) {
            seen.push(coords);
        }
        assert_eq!(
            seen,
            vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]
        );
        assert!(!advance_odometer(&mut [], &[]));
    }
}
