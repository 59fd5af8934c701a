/// Stable index of an actor within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub(crate) usize);

/// A named identity that may trigger steps and identify a running session.
///
/// Steps declare which actors are allowed to trigger them; a runner carries
/// the actor it currently acts as. An actor is also the addressee of
/// publish-to forwarding.
#[derive(Debug, Clone)]
pub struct Actor {
    pub(crate) id: ActorId,
    pub(crate) name: String,
}

impl Actor {
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
