/// Policy for deriving nullability of scalar and enum members in a
/// [`TypeShape`](crate::TypeShape).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresencePolicy {
    /// Scalars and enums always carry their default value.
    ///
    /// Only message references and oneof slots are nullable.
    AlwaysDefault,
    /// Presence-aware behavior (default):
    ///
    /// Fields with explicit presence (proto2 `optional`, proto3 `optional`)
    /// are nullable; implicit-presence and `required` fields are not.
    #[default]
    PresenceAware,
}
