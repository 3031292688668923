//! Stream graph nodes.
//!
//! A [`Stream`] is an immutable, reference-counted node. Cloning it is cheap
//! and clones resolve to the same reference, which is how a single decoded
//! input or filter output gets fed to several consumers.

use std::fs::File;
use std::sync::Arc;

use media_types::StreamKind;

use crate::graph::{FilterGraph, fd_path};

/// A named ffmpeg input and the options placed before its `-i`.
///
/// Two inputs are the same input when name and options match element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Input {
    pub name: String,
    pub options: Vec<String>,
}

impl Input {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Shared handle to a file that is already open.
///
/// Handles are compared by identity: clones of one `FileHandle` are the same
/// resource, two handles wrapping different `File`s never are, even if they
/// point at the same path. The graph only records the handle; opening and
/// closing it stays with the caller.
#[derive(Debug, Clone)]
pub struct FileHandle(Arc<File>);

impl FileHandle {
    pub fn new(file: File) -> Self {
        Self(Arc::new(file))
    }

    pub fn file(&self) -> &File {
        &self.0
    }

    /// Whether both handles refer to the same open resource.
    #[inline]
    pub fn same_resource(&self, other: &FileHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<File> for FileHandle {
    fn from(file: File) -> Self {
        Self::new(file)
    }
}

impl From<Arc<File>> for FileHandle {
    fn from(file: Arc<File>) -> Self {
        Self(file)
    }
}

#[derive(Debug)]
struct FileInput {
    handle: FileHandle,
    options: Vec<String>,
}

/// One filter application shared by every output node it produces.
#[derive(Debug)]
struct FilterOp {
    inputs: Vec<Stream>,
    expr: String,
    arity: usize,
}

#[derive(Debug)]
enum Node {
    Input(Input),
    File(FileInput),
    Portion(Stream, StreamKind),
    Optional(Stream),
    Filter { op: Arc<FilterOp>, index: usize },
}

/// A media stream in the pipeline graph.
#[derive(Debug, Clone)]
pub struct Stream(Arc<Node>);

impl Stream {
    fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// An input addressed by name (file path, URL, lavfi source...).
    pub fn input(name: impl Into<String>) -> Self {
        Input::new(name).into()
    }

    pub fn input_with_options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Input::with_options(name, options).into()
    }

    /// An input read from an open file handle.
    pub fn file(handle: &FileHandle) -> Self {
        Self::file_with_options(handle, Vec::<String>::new())
    }

    pub fn file_with_options<I, S>(handle: &FileHandle, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_node(Node::File(FileInput {
            handle: handle.clone(),
            options: options.into_iter().map(Into::into).collect(),
        }))
    }

    /// Narrow this stream to one kind of elementary stream.
    pub fn select(&self, kind: StreamKind) -> Self {
        Self::from_node(Node::Portion(self.clone(), kind))
    }

    /// The video portion of this stream.
    pub fn video(&self) -> Self {
        self.select(StreamKind::Video)
    }

    /// The audio portion of this stream.
    pub fn audio(&self) -> Self {
        self.select(StreamKind::Audio)
    }

    /// Map this stream only if it exists (`?` suffix).
    pub fn optional(&self) -> Self {
        Self::from_node(Node::Optional(self.clone()))
    }

    /// Build the `arity` output nodes of a single filter application.
    pub(crate) fn filter_outputs(inputs: Vec<Stream>, expr: String, arity: usize) -> Vec<Self> {
        let op = Arc::new(FilterOp {
            inputs,
            expr,
            arity,
        });
        (0..arity)
            .map(|index| {
                Self::from_node(Node::Filter {
                    op: Arc::clone(&op),
                    index,
                })
            })
            .collect()
    }

    /// Build a single-output filter application.
    pub(crate) fn filter(inputs: Vec<Stream>, expr: String) -> Self {
        Self::from_node(Node::Filter {
            op: Arc::new(FilterOp {
                inputs,
                expr,
                arity: 1,
            }),
            index: 0,
        })
    }

    /// Whether this stream comes straight from a declared input, possibly
    /// narrowed or marked optional, rather than from a filter.
    ///
    /// Input references are mapped bare (`-map 0:v`), filter outputs are
    /// mapped by label (`-map [s0]`).
    pub fn is_input(&self) -> bool {
        match &*self.0 {
            Node::Input(_) | Node::File(_) => true,
            Node::Portion(inner, _) | Node::Optional(inner) => inner.is_input(),
            Node::Filter { .. } => false,
        }
    }

    /// Register this stream and everything it depends on in `graph`,
    /// returning the reference that names it.
    ///
    /// Inputs resolve to their index (`"0"`), filter outputs to their label
    /// (`"s3"`). Resolving the same stream again, or a structurally equal
    /// one, registers nothing new.
    pub fn resolve(&self, graph: &mut FilterGraph) -> String {
        match &*self.0 {
            Node::Input(input) => graph.add_input(input).to_string(),
            Node::File(file) => {
                // The descriptor path goes through the regular input table so
                // one handle is never declared twice.
                let position = graph.add_file(&file.handle);
                let input = Input {
                    name: fd_path(position),
                    options: file.options.clone(),
                };
                graph.add_input(&input).to_string()
            }
            Node::Portion(inner, kind) => {
                format!("{}:{}", inner.resolve(graph), kind.specifier())
            }
            Node::Optional(inner) => format!("{}?", inner.resolve(graph)),
            Node::Filter { op, index } => {
                let inputs = op.inputs.iter().map(|s| s.resolve(graph)).collect();
                graph.add_filter(inputs, &op.expr, op.arity)[*index].clone()
            }
        }
    }
}

impl From<Input> for Stream {
    fn from(input: Input) -> Self {
        Self::from_node(Node::Input(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input() {
        let a = Stream::input("a.mp4");
        assert!(a.is_input());
        assert!(a.video().is_input());
        assert!(a.audio().optional().is_input());

        let flipped = Stream::filter(vec![a.clone()], "hflip".to_string());
        assert!(!flipped.is_input());
        assert!(!flipped.optional().is_input());
    }

    #[test]
    fn test_filter_outputs_share_op() {
        let a = Stream::input("a.mp4");
        let outs = Stream::filter_outputs(vec![a], "split=3".to_string(), 3);
        assert_eq!(outs.len(), 3);

        let ops: Vec<_> = outs
            .iter()
            .map(|s| match &*s.0 {
                Node::Filter { op, index } => (Arc::as_ptr(op), *index),
                _ => panic!("expected filter node"),
            })
            .collect();
        assert!(ops.iter().all(|(p, _)| *p == ops[0].0));
        assert_eq!(ops.iter().map(|(_, i)| *i).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn test_suffixes() {
        let mut graph = FilterGraph::new();
        let a = Stream::input("a.mp4");
        assert_eq!(a.video().resolve(&mut graph), "0:v");
        assert_eq!(a.audio().resolve(&mut graph), "0:a");
        assert_eq!(a.audio().optional().resolve(&mut graph), "0:a?");
        assert_eq!(graph.inputs().len(), 1);
    }

    #[test]
    fn test_file_handle_identity() {
        let file = tempfile::tempfile().unwrap();
        let other = file.try_clone().unwrap();

        let handle = FileHandle::new(file);
        let same = handle.clone();
        let different = FileHandle::new(other);

        assert!(handle.same_resource(&same));
        assert!(!handle.same_resource(&different));
    }
}
