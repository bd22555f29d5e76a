// Compiled script snippets, anchored in the interpreter and addressed by handle

use std::fmt;

use ahash::AHashMap;
use luars::{LuaVM, LuaValue};
use tracing::debug;

use crate::error::{BenchError, BenchResult, LuaResultExt};
use crate::fixtures::ACCUMULATOR;
use crate::state;

/// Global table that keeps loaded snippets reachable for the collector.
pub const ANCHOR: &str = "_LBS_SNIPPETS";

/// Integer key of a loaded snippet in [`ANCHOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetHandle(i64);

impl SnippetHandle {
    pub fn id(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Compile-once, run-many storage for script snippets.
///
/// Handles released by [`unload`](Self::unload) are handed out again by
/// later loads. Dropping the cache without unloading leaves the snippets
/// anchored until the interpreter itself is dropped.
pub struct CodeCache {
    anchor: LuaValue,
    snippets: AHashMap<SnippetHandle, LuaValue>,
    free: Vec<i64>,
    next_id: i64,
}

impl CodeCache {
    pub fn new(vm: &mut LuaVM) -> BenchResult<Self> {
        let anchor = vm.create_table(0, 4).bench_err(vm)?;
        state::set_global(vm, ANCHOR, anchor)?;
        Ok(Self {
            anchor,
            snippets: AHashMap::new(),
            free: Vec::new(),
            next_id: 1,
        })
    }

    /// Compile `source` without running it.
    pub fn load(&mut self, vm: &mut LuaVM, source: &str) -> BenchResult<SnippetHandle> {
        let func = vm.load(source).bench_err(vm)?;
        let id = self.free.pop().unwrap_or_else(|| {
            let id = self.next_id;
            self.next_id += 1;
            id
        });
        state::set_field(vm, &self.anchor, &LuaValue::integer(id), func)?;
        let handle = SnippetHandle(id);
        self.snippets.insert(handle, func);
        debug!(%handle, bytes = source.len(), "loaded snippet");
        Ok(handle)
    }

    /// Call a loaded snippet with no arguments, discarding its results.
    pub fn run(&self, vm: &mut LuaVM, handle: SnippetHandle) -> BenchResult<()> {
        let func = *self
            .snippets
            .get(&handle)
            .ok_or(BenchError::UnknownSnippet(handle))?;
        vm.call_raw(func, Vec::new()).bench_err(vm)?;
        Ok(())
    }

    /// Release a snippet; its handle may be handed out again by `load`.
    pub fn unload(&mut self, vm: &mut LuaVM, handle: SnippetHandle) -> BenchResult<()> {
        if self.snippets.remove(&handle).is_none() {
            return Err(BenchError::UnknownSnippet(handle));
        }
        state::set_field(vm, &self.anchor, &LuaValue::integer(handle.0), LuaValue::nil())?;
        self.free.push(handle.0);
        debug!(%handle, "unloaded snippet");
        Ok(())
    }

    pub fn clear(&mut self, vm: &mut LuaVM) -> BenchResult<()> {
        let handles: Vec<SnippetHandle> = self.snippets.keys().copied().collect();
        for handle in handles {
            self.unload(vm, handle)?;
        }
        Ok(())
    }

    pub fn contains(&self, handle: SnippetHandle) -> bool {
        self.snippets.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Compile and run `source` once. Used for check snippets and script-side
/// fixture definitions.
pub fn do_string(vm: &mut LuaVM, source: &str) -> BenchResult<Vec<LuaValue>> {
    let func = vm.load(source).bench_err(vm)?;
    vm.call_raw(func, Vec::new()).bench_err(vm)
}

/// Unroll `body` `repetition` times into one chunk.
///
/// The chunk sums into a local `x` and adds it to the global accumulator
/// once at the end, so one run of the result equals `repetition` runs of
/// the single-body chunk.
pub fn repeated_code(body: &str, repetition: usize) -> String {
    let mut code = String::with_capacity(body.len() * repetition + 32);
    code.push_str("local x = 0\n");
    for _ in 0..repetition {
        code.push_str(body);
        if !body.ends_with('\n') {
            code.push('\n');
        }
    }
    code.push_str(ACCUMULATOR);
    code.push_str(" = ");
    code.push_str(ACCUMULATOR);
    code.push_str(" + x\n");
    code
}
