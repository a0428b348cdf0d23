use std::fmt;
use std::sync::Arc;

use docfresh_store::CacheStore;

use crate::{DocumentHandle, FlowConfig};

/// Distinguishes successive runs of the flow.
///
/// Worker results carry the id of the attempt that started them; results
/// from a superseded attempt are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(u64);

impl AttemptId {
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self { Self(self.0 + 1) }

    pub fn get(self) -> u64 { self.0 }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// Everything one attempt needs, fixed when the attempt starts.
#[derive(Clone)]
pub struct FlowContext {
    pub attempt:  AttemptId,
    pub document: Option<Arc<dyn DocumentHandle>>,
    pub config:   Arc<FlowConfig>,
    pub cache:    CacheStore,
}

impl fmt::Debug for FlowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowContext")
            .field("attempt", &self.attempt)
            .field("document", &self.document.as_ref().map(|d| d.display_location()))
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}

impl FlowContext {
    /// The same inputs under a new attempt id, for a user-triggered retry.
    pub fn restart(&self, attempt: AttemptId) -> Self {
        Self {
            attempt,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_ids_increase() {
        let a = AttemptId::FIRST;
        let b = a.next();
        assert!(b > a);
        assert_eq!(b.get(), 2);
        assert_eq!(b.to_string(), "#2");
    }

    #[test]
    fn test_restart_keeps_inputs() {
        let ctx = FlowContext {
            attempt:  AttemptId::FIRST,
            document: None,
            config:   Arc::new(FlowConfig::default()),
            cache:    CacheStore::new("/tmp/docfresh"),
        };
        let next = ctx.restart(ctx.attempt.next());

        assert_eq!(next.attempt.get(), 2);
        assert!(Arc::ptr_eq(&next.config, &ctx.config));
        assert_eq!(next.cache, ctx.cache);
    }
}
