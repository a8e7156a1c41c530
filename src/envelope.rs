use crate::id::Identifier;
use crate::message::Payload;

/// A message in transit: a payload together with the identifier of the
/// actor it is addressed to.
pub struct Envelope {
    pub payload: Payload,
    pub receiver: Identifier,
}

impl Envelope {
    pub fn new(payload: Payload, receiver: Identifier) -> Self {
        Envelope { payload, receiver }
    }

    pub fn user<T: std::any::Any + Send>(msg: T, receiver: Identifier) -> Self {
        Envelope::new(Payload::user(msg), receiver)
    }
}
