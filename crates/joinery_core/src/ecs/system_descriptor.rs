use crate::ecs::{ComponentId, CoreError, SlotKind};

/// One slot of a system signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotInfo {
    pub kind: SlotKind,
    pub component: ComponentId,
    pub name: &'static str,
}

/// Metadata describing which stores a system reads and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    name: String,
    slots: Vec<SlotInfo>,
}

impl SystemDescriptor {
    /// Create a descriptor from a name and the signature's slots, in order.
    pub fn new(name: impl Into<String>, slots: Vec<SlotInfo>) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every slot in declaration order.
    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    /// Dynamic components that must be present (`Read` and `Group` slots).
    pub fn required(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids_where(|kind| kind.is_required())
    }

    pub fn optional(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids_where(|kind| kind == SlotKind::Optional)
    }

    pub fn statics(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids_where(|kind| kind == SlotKind::Static)
    }

    pub fn dynamic(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids_where(|kind| kind.is_dynamic())
    }

    /// Whether `component` appears as an optional slot.
    pub fn is_optional(&self, component: ComponentId) -> bool {
        self.optional().any(|id| id == component)
    }

    /// Whether the signature names at least one dynamic slot.
    pub fn has_dynamic(&self) -> bool {
        self.dynamic().next().is_some()
    }

    /// Check structural preconditions that do not depend on store contents.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (i, slot) in self.slots.iter().enumerate() {
            if self.slots[..i].iter().any(|s| s.component == slot.component) {
                return Err(CoreError::precondition(
                    &self.name,
                    format!("component `{}` appears twice in the signature", slot.name),
                ));
            }
        }
        Ok(())
    }

    fn ids_where(
        &self,
        pred: impl Fn(SlotKind) -> bool + 'static,
    ) -> impl Iterator<Item = ComponentId> + '_ {
        self.slots
            .iter()
            .filter(move |slot| pred(slot.kind))
            .map(|slot| slot.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(kind: SlotKind, component: ComponentId, name: &'static str) -> SlotInfo {
        SlotInfo {
            kind,
            component,
            name,
        }
    }

    #[test]
    fn partitions_slots_by_kind() {
        let desc = SystemDescriptor::new(
            "render",
            vec![
                slot(SlotKind::Static, 10, "Light"),
                slot(SlotKind::Optional, 11, "Pos"),
                slot(SlotKind::Required, 12, "Hom"),
                slot(SlotKind::Group, 13, "Tag"),
            ],
        );

        assert_eq!(desc.name(), "render");
        assert_eq!(desc.required().collect::<Vec<_>>(), vec![12, 13]);
        assert_eq!(desc.optional().collect::<Vec<_>>(), vec![11]);
        assert_eq!(desc.statics().collect::<Vec<_>>(), vec![10]);
        assert_eq!(desc.dynamic().collect::<Vec<_>>(), vec![11, 12, 13]);
        assert!(desc.is_optional(11));
        assert!(!desc.is_optional(12));
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn duplicate_component_is_rejected() {
        let desc = SystemDescriptor::new(
            "dup",
            vec![
                slot(SlotKind::Required, 1, "Pos"),
                slot(SlotKind::Optional, 1, "Pos"),
            ],
        );
        let err = desc.validate().unwrap_err();
        assert!(matches!(err, CoreError::DispatchPrecondition { ref system, .. } if system == "dup"));
    }

    #[test]
    fn statics_only_has_no_dynamic() {
        let desc = SystemDescriptor::new("s", vec![slot(SlotKind::Static, 3, "Cam")]);
        assert!(!desc.has_dynamic());
    }
}
