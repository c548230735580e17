// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for actors in the process.
///
/// Uses UUID v4 for collision-resistant identifiers that are cheap to copy.
/// The id shows up in log output so that two actors spawned from the same
/// type can be told apart.
///
/// # Example
/// ```rust
/// use strand_rt::util::ActorId;
///
/// let id1 = ActorId::new();
/// let id2 = ActorId::new();
/// assert_ne!(id1, id2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random ActorId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ActorId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagnostic label for one spawned actor.
///
/// Every actor gets a fresh [`ActorId`] at spawn time; a human-readable name
/// is optional and purely cosmetic. The label has no routing role — an
/// [`ActorRef`](crate::ActorRef) is the only way to reach an actor — it
/// exists so log lines say which actor they concern.
///
/// `Display` renders `name:id` for named actors and the bare id otherwise.
///
/// # Example
/// ```rust
/// use strand_rt::util::ActorAddress;
///
/// let labeled = ActorAddress::named("ingest");
/// assert_eq!(labeled.name(), Some("ingest"));
/// assert!(format!("{labeled}").starts_with("ingest:"));
///
/// let unlabeled = ActorAddress::anonymous();
/// assert_eq!(unlabeled.name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActorAddress {
    id: ActorId,
    name: Option<String>,
}

impl ActorAddress {
    /// Label for an actor spawned with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: Some(name.into()),
        }
    }

    /// Label for an actor spawned without a name.
    pub fn anonymous() -> Self {
        Self {
            id: ActorId::new(),
            name: None,
        }
    }

    /// The actor's unique id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The spawn-time name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Display for ActorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}:")?;
        }
        write!(f, "{}", self.id)
    }
}
