//
// Copyright (c) 2025 Nathan Fiedler
//

//! Process-wide registry mapping algorithm names to constructors.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::algorithm::CutpointAlgorithm;
use crate::algorithms::{fastcdc::FastCdc, jc::Jc, ultracdc::UltraCdc};
#[cfg(feature = "xorcdc")]
use crate::algorithms::xorcdc::XorCdc;
use crate::error::Error;

/// Produces a fresh, boxed algorithm instance.
pub type Constructor = fn() -> Box<dyn CutpointAlgorithm + Send>;

struct AlgorithmRegistry {
    factories: RwLock<HashMap<&'static str, Constructor>>,
}

impl AlgorithmRegistry {
    fn new() -> Self {
        let registry = Self {
            factories: RwLock::new(HashMap::new()),
        };
        registry.register_builtins();
        registry
    }

    fn register_builtins(&self) {
        self.register_unchecked("fastcdc", || Box::new(FastCdc));
        self.register_unchecked("ultracdc", || Box::new(UltraCdc));
        self.register_unchecked("jc", || Box::new(Jc::default()));
        #[cfg(feature = "xorcdc")]
        self.register_unchecked("xorcdc", || Box::new(XorCdc));
    }

    fn register_unchecked(&self, name: &'static str, constructor: Constructor) {
        let mut factories = self.factories.write().expect("registry lock poisoned");
        factories.insert(name, constructor);
        log::trace!("registered chunking algorithm {name:?}");
    }

    fn register(&self, name: &'static str, constructor: Constructor) -> Result<(), Error> {
        let mut factories = self.factories.write().expect("registry lock poisoned");
        if factories.contains_key(name) {
            return Err(Error::AlreadyRegistered(name.to_string()));
        }
        factories.insert(name, constructor);
        log::trace!("registered chunking algorithm {name:?}");
        Ok(())
    }

    fn construct(&self, name: &str) -> Result<Box<dyn CutpointAlgorithm + Send>, Error> {
        let factories = self.factories.read().expect("registry lock poisoned");
        match factories.get(name) {
            Some(constructor) => Ok(constructor()),
            None => Err(Error::UnknownAlgorithm(name.to_string())),
        }
    }
}

static REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(AlgorithmRegistry::new);

/// Register a new algorithm constructor under `name`. Fails with
/// [`Error::AlreadyRegistered`] if `name` is already taken, including by one
/// of the built-ins.
pub fn register(name: &'static str, constructor: Constructor) -> Result<(), Error> {
    REGISTRY.register(name, constructor)
}

/// Construct a fresh algorithm instance by name. Fails with
/// [`Error::UnknownAlgorithm`] if `name` is not registered.
pub fn construct(name: &str) -> Result<Box<dyn CutpointAlgorithm + Send>, Error> {
    REGISTRY.construct(name)
}
