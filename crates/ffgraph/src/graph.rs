//! The builder context a pipeline is resolved into.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::stream::{FileHandle, Input, Stream};
use crate::{FD_BASE, FD_PATH_PREFIX, LABEL_PREFIX};

/// Path under which the execution environment exposes the file handle at
/// `position` in the handle table.
pub(crate) fn fd_path(position: usize) -> String {
    format!("{}/{}", FD_PATH_PREFIX, position + FD_BASE)
}

/// Identity of a filter application: the same expression applied to the
/// same resolved inputs with the same number of outputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub expr: String,
    pub inputs: Vec<String>,
    pub arity: usize,
}

/// A registered filter application and the labels generated for it.
#[derive(Debug, Clone)]
pub struct FilterEntry {
    key: FilterKey,
    outputs: Vec<String>,
}

impl FilterEntry {
    pub fn key(&self) -> &FilterKey {
        &self.key
    }

    pub fn expr(&self) -> &str {
        &self.key.expr
    }

    pub fn inputs(&self) -> &[String] {
        &self.key.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

/// Renders as one filtergraph chain element: `[in]...expr[out]...`.
impl fmt::Display for FilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for input in &self.key.inputs {
            write!(f, "[{}]", input)?;
        }
        f.write_str(&self.key.expr)?;
        for output in &self.outputs {
            write!(f, "[{}]", output)?;
        }
        Ok(())
    }
}

/// A resolved stream reference inside an output mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapRef {
    /// Stream taken from a declared input, e.g. `0:v?`.
    Input(String),
    /// Filter output label, e.g. `s2`.
    Label(String),
}

/// Renders the `-map` argument: input references bare, labels bracketed.
impl fmt::Display for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(r) => f.write_str(r),
            Self::Label(l) => write!(f, "[{}]", l),
        }
    }
}

/// A declared output file.
#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    pub options: Vec<String>,
    pub streams: Vec<MapRef>,
}

/// Accumulates the inputs, filters and outputs of one ffmpeg invocation.
///
/// Every distinct input, file handle and filter application is registered
/// once, in the order it is first reached. A filter is only appended after
/// all of its inputs have been resolved, so the filter list is always in
/// dependency order.
#[derive(Debug, Default)]
pub struct FilterGraph {
    inputs: Vec<Input>,
    input_index: FxHashMap<Input, usize>,
    files: Vec<FileHandle>,
    filters: Vec<FilterEntry>,
    filter_index: FxHashMap<FilterKey, usize>,
    outputs: Vec<Output>,
    next_label: usize,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared inputs, in `-i` order.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Open file handles, in descriptor order starting at [`FD_BASE`].
    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    /// Registered filters, in dependency order.
    pub fn filters(&self) -> &[FilterEntry] {
        &self.filters
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Number of labels generated so far.
    pub fn label_count(&self) -> usize {
        self.next_label
    }

    /// Resolve `stream` into this graph. See [`Stream::resolve`].
    pub fn resolve(&mut self, stream: &Stream) -> String {
        stream.resolve(self)
    }

    /// Declare an output named `name` carrying `streams` in order.
    ///
    /// All streams are resolved immediately.
    pub fn add_output(&mut self, name: impl Into<String>, options: Vec<String>, streams: &[Stream]) {
        let streams = streams.iter().map(|s| self.map_ref(s)).collect();
        self.outputs.push(Output {
            name: name.into(),
            options,
            streams,
        });
    }

    /// Declare an output written to an open file handle.
    ///
    /// The handle shares the descriptor table with input handles.
    pub fn add_file_output(&mut self, handle: &FileHandle, options: Vec<String>, streams: &[Stream]) {
        let position = self.add_file(handle);
        self.add_output(fd_path(position), options, streams);
    }

    fn map_ref(&mut self, stream: &Stream) -> MapRef {
        let reference = stream.resolve(self);
        if stream.is_input() {
            MapRef::Input(reference)
        } else {
            MapRef::Label(reference)
        }
    }

    /// Index of `input`, registering it if unseen.
    pub(crate) fn add_input(&mut self, input: &Input) -> usize {
        if let Some(&index) = self.input_index.get(input) {
            return index;
        }
        let index = self.inputs.len();
        trace!("Registered input #{}: {}", index, input.name);
        self.input_index.insert(input.clone(), index);
        self.inputs.push(input.clone());
        index
    }

    /// Position of `handle` in the handle table, registering it if unseen.
    pub(crate) fn add_file(&mut self, handle: &FileHandle) -> usize {
        if let Some(position) = self.files.iter().position(|f| f.same_resource(handle)) {
            return position;
        }
        self.files.push(handle.clone());
        let position = self.files.len() - 1;
        trace!("Registered file handle at {}", fd_path(position));
        position
    }

    /// Output labels of the filter `expr` over `inputs`, registering it if
    /// unseen.
    pub(crate) fn add_filter(&mut self, inputs: Vec<String>, expr: &str, arity: usize) -> &[String] {
        let key = FilterKey {
            expr: expr.to_string(),
            inputs,
            arity,
        };
        let position = match self.filter_index.get(&key).copied() {
            Some(position) => position,
            None => {
                let outputs: Vec<String> = (0..arity).map(|_| self.next_label()).collect();
                let position = self.filters.len();
                trace!("Registered filter {:?} -> {:?}", key.expr, outputs);
                self.filter_index.insert(key.clone(), position);
                self.filters.push(FilterEntry { key, outputs });
                position
            }
        };
        &self.filters[position].outputs
    }

    fn next_label(&mut self) -> String {
        let label = format!("{}{}", LABEL_PREFIX, self.next_label);
        self.next_label += 1;
        label
    }
}
