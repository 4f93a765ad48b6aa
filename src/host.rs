//! Boundary host for the engine module.
//!
//! Owns one instantiated WASM module: its store, its exported linear
//! `memory`, and its allocator exports. The host knows nothing about
//! which engine operations exist; it only implements the generic call
//! protocol over NUL-terminated JSON payloads:
//!
//! 1. encode the request (wire codec),
//! 2. allocate a region sized to the encoded bytes,
//! 3. copy the bytes into the region,
//! 4. invoke the named export with the region's pointer,
//! 5. copy the terminated response bytes out of memory,
//! 6. free the response pointer,
//! 7. parse and return the decoded value.
//!
//! The request pointer is consumed by the module's own invocation
//! semantics; only response pointers are freed here. Calls mutate the
//! module's single linear memory and allocator state, so `call` takes
//! `&mut self` — two calls against the same instance can never overlap.

use serde::Serialize;
use wasmtime::{Instance, Memory, Module, Store, TypedFunc};

use crate::error::{Error, Result};
use crate::wire;

/// Export name of the module's linear memory.
pub const EXPORT_MEMORY: &str = "memory";
/// Export name of the module's allocator.
pub const EXPORT_ALLOCATE: &str = "allocate";
/// Export name of the module's deallocator.
pub const EXPORT_FREE: &str = "free";

/// Host side of the module boundary.
#[derive(Debug)]
pub struct BoundaryHost {
    store: Store<()>,
    instance: Instance,
    memory: Memory,
}

impl BoundaryHost {
    /// Instantiate a module from its binary (or WAT text) and resolve the
    /// memory export. The module must require no imports.
    pub fn new(module_bytes: &[u8]) -> Result<Self> {
        let engine = wasmtime::Engine::default();
        let module = Module::new(&engine, module_bytes)?;
        let mut store = Store::new(&engine, ());
        let instance = Instance::new(&mut store, &module, &[])?;
        let memory = instance
            .get_memory(&mut store, EXPORT_MEMORY)
            .ok_or(Error::MissingExport {
                name: EXPORT_MEMORY,
            })?;
        Ok(Self {
            store,
            instance,
            memory,
        })
    }

    /// Request a region of at least `capacity` bytes from the module's
    /// allocator. A null pointer from the module means exhaustion.
    pub fn allocate(&mut self, capacity: u32) -> Result<u32> {
        let allocate: TypedFunc<u32, u32> = self
            .instance
            .get_typed_func(&mut self.store, EXPORT_ALLOCATE)?;
        let pointer = allocate.call(&mut self.store, capacity)?;
        if pointer == 0 {
            return Err(Error::Allocation { capacity });
        }
        Ok(pointer)
    }

    /// Release a region previously returned as a response pointer. The
    /// module scans for the NUL terminator to determine the freed length.
    pub fn deallocate(&mut self, pointer: u32) -> Result<()> {
        let free: TypedFunc<u32, ()> = self
            .instance
            .get_typed_func(&mut self.store, EXPORT_FREE)?;
        free.call(&mut self.store, pointer)?;
        Ok(())
    }

    /// Run one request/response exchange against the named export.
    pub fn call<T: Serialize + ?Sized>(
        &mut self,
        request: &T,
        export: &str,
    ) -> Result<serde_json::Value> {
        let encoded = wire::encode(request)?;
        let request_pointer = self.allocate(encoded.len() as u32)?;
        self.memory
            .write(&mut self.store, request_pointer as usize, &encoded)
            .map_err(wasmtime::Error::from)?;

        let function: TypedFunc<u32, u32> =
            self.instance.get_typed_func(&mut self.store, export)?;
        let response_pointer = function.call(&mut self.store, request_pointer)?;

        // The module's `free` scans for the terminator, so an unterminated
        // response cannot be released; every terminated one is copied out
        // and freed before parsing, even when the payload turns out to be
        // malformed.
        let response =
            wire::terminated(self.memory.data(&self.store), response_pointer as usize)?.to_vec();
        self.deallocate(response_pointer)?;
        let value = wire::parse(&response)?;
        Ok(value)
    }
}
