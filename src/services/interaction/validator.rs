//! Host-supplied validation of proposed moves and resizes.

use crate::models::item::DraggableItem;
use crate::models::viewport::TimeMs;

use super::gesture::ResizeEdge;

/// What kind of change is being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationAction {
    Move,
    Resize,
}

/// A proposed change, handed to the validator on every sample
#[derive(Debug, Clone, Copy)]
pub struct ValidationRequest<'a> {
    pub action: ValidationAction,
    pub item: &'a DraggableItem,
    pub time: TimeMs,
    /// Edge being resized; `None` for moves and for resizes whose edge is
    /// not known yet
    pub edge: Option<ResizeEdge>,
    pub proposed_group_index: usize,
    pub original_group_index: usize,
}

/// The validator's verdict: the time to use and, optionally, the group
/// index to use instead of the one the pointer points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub time: TimeMs,
    pub group_index_override: Option<usize>,
}

impl Validation {
    pub fn time(time: TimeMs) -> Self {
        Self {
            time,
            group_index_override: None,
        }
    }

    pub fn with_group(time: TimeMs, group_index: usize) -> Self {
        Self {
            time,
            group_index_override: Some(group_index),
        }
    }
}

/// A bare time is a verdict that leaves the group alone
impl From<TimeMs> for Validation {
    fn from(time: TimeMs) -> Self {
        Self::time(time)
    }
}

/// Gets the final say on every proposed move or resize.
pub trait MoveResizeValidator {
    fn validate(&self, request: &ValidationRequest<'_>) -> Validation;
}

impl<F> MoveResizeValidator for F
where
    F: Fn(&ValidationRequest<'_>) -> Validation,
{
    fn validate(&self, request: &ValidationRequest<'_>) -> Validation {
        self(request)
    }
}

/// Keeps items inside a time window and a range of groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsValidator {
    pub min_time: TimeMs,
    pub max_time: TimeMs,
    pub max_group_index: usize,
}

impl MoveResizeValidator for BoundsValidator {
    fn validate(&self, request: &ValidationRequest<'_>) -> Validation {
        match request.action {
            ValidationAction::Move => {
                let length = request.item.length();
                let latest_start = (self.max_time - length).max(self.min_time);
                let time = request.time.clamp(self.min_time, latest_start);
                let group = request.proposed_group_index.min(self.max_group_index);
                if group == request.proposed_group_index {
                    Validation::time(time)
                } else {
                    Validation::with_group(time, group)
                }
            }
            ValidationAction::Resize => {
                Validation::time(request.time.clamp(self.min_time, self.max_time))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(item: &DraggableItem, action: ValidationAction, time: TimeMs, group: usize) -> ValidationRequest<'_> {
        ValidationRequest {
            action,
            item,
            time,
            edge: None,
            proposed_group_index: group,
            original_group_index: item.group_index,
        }
    }

    #[test]
    fn test_bare_time_converts_without_group() {
        let validation: Validation = 4200_i64.into();
        assert_eq!(validation, Validation::time(4200));
        assert_eq!(validation.group_index_override, None);
    }

    #[test]
    fn test_closures_are_validators() {
        let item = DraggableItem::new("a", 0, 1000, 0).unwrap();
        let validator = |req: &ValidationRequest<'_>| Validation::from(req.time + 1);
        let result = validator.validate(&request(&item, ValidationAction::Move, 10, 0));
        assert_eq!(result.time, 11);
    }

    #[test]
    fn test_bounds_validator_clamps_moves() {
        let item = DraggableItem::new("a", 0, 1000, 0).unwrap();
        let bounds = BoundsValidator {
            min_time: 0,
            max_time: 10_000,
            max_group_index: 2,
        };

        let early = bounds.validate(&request(&item, ValidationAction::Move, -500, 1));
        assert_eq!(early, Validation::time(0));

        let late = bounds.validate(&request(&item, ValidationAction::Move, 9_500, 5));
        assert_eq!(late, Validation::with_group(9_000, 2));
    }

    #[test]
    fn test_bounds_validator_clamps_resizes() {
        let item = DraggableItem::new("a", 0, 1000, 0).unwrap();
        let bounds = BoundsValidator {
            min_time: 0,
            max_time: 10_000,
            max_group_index: 0,
        };
        let result = bounds.validate(&request(&item, ValidationAction::Resize, 12_000, 0));
        assert_eq!(result, Validation::time(10_000));
    }
}
