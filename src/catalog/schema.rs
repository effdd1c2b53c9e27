//! Static parameter schemas, one per `NodeKind`.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::kind::NodeKind;

/// Number of incoming edges a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// One or more unordered inputs.
    Variadic,
}

/// Serialized as the editor expects it: a count, or `-1` for variadic.
impl Serialize for Arity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arity::Fixed(n) => serializer.serialize_u64(*n as u64),
            Arity::Variadic => serializer.serialize_i64(-1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamDefault {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(&'static str),
}

#[derive(Debug, Serialize)]
pub struct NodeSchema {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Recognized parameter names, in display order.
    pub params: &'static [&'static str],
    pub required: &'static [&'static str],
    #[serde(serialize_with = "serialize_defaults")]
    pub defaults: &'static [(&'static str, ParamDefault)],
    pub inputs: Arity,
    pub outputs: usize,
}

impl NodeSchema {
    pub fn default_for(&self, name: &str) -> Option<ParamDefault> {
        self.defaults
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| *value)
    }

    pub fn recognizes(&self, name: &str) -> bool {
        self.params.contains(&name)
    }
}

fn serialize_defaults<S: Serializer>(
    defaults: &&'static [(&'static str, ParamDefault)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(defaults.len()))?;
    for (name, value) in defaults.iter() {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

const fn single(
    kind: NodeKind,
    params: &'static [&'static str],
    required: &'static [&'static str],
    defaults: &'static [(&'static str, ParamDefault)],
) -> NodeSchema {
    NodeSchema {
        kind,
        params,
        required,
        defaults,
        inputs: Arity::Fixed(1),
        outputs: 1,
    }
}

const NONE: &[&str] = &[];
const NO_DEFAULTS: &[(&str, ParamDefault)] = &[];

const CONV_PARAMS: &[&str] = &["in_channels", "out_channels", "kernel_size", "stride", "padding"];
const CONV_REQUIRED: &[&str] = &["in_channels", "out_channels", "kernel_size"];
const CONV_DEFAULTS: &[(&str, ParamDefault)] =
    &[("stride", ParamDefault::Int(1)), ("padding", ParamDefault::Int(0))];

const POOL_PARAMS: &[&str] = &["kernel_size", "stride", "padding"];
const POOL_REQUIRED: &[&str] = &["kernel_size"];
const POOL_DEFAULTS: &[(&str, ParamDefault)] =
    &[("stride", ParamDefault::Int(2)), ("padding", ParamDefault::Int(0))];

const RECURRENT_REQUIRED: &[&str] = &["input_size", "hidden_size"];
const GATED_PARAMS: &[&str] = &["input_size", "hidden_size", "num_layers", "bidirectional"];
const GATED_DEFAULTS: &[(&str, ParamDefault)] = &[
    ("num_layers", ParamDefault::Int(1)),
    ("bidirectional", ParamDefault::Bool(false)),
];

static INPUT: NodeSchema = NodeSchema {
    kind: NodeKind::Input,
    params: &["shape"],
    required: &["shape"],
    defaults: NO_DEFAULTS,
    inputs: Arity::Fixed(0),
    outputs: 1,
};
static OUTPUT: NodeSchema = single(
    NodeKind::Output,
    &["outputType", "numClasses"],
    NONE,
    &[
        ("outputType", ParamDefault::Str("classification")),
        ("numClasses", ParamDefault::Int(10)),
    ],
);

static CONV1D: NodeSchema = single(NodeKind::Conv1D, CONV_PARAMS, CONV_REQUIRED, CONV_DEFAULTS);
static CONV2D: NodeSchema = single(NodeKind::Conv2D, CONV_PARAMS, CONV_REQUIRED, CONV_DEFAULTS);
static CONV3D: NodeSchema = single(NodeKind::Conv3D, CONV_PARAMS, CONV_REQUIRED, CONV_DEFAULTS);
static CONV_TRANSPOSE2D: NodeSchema = single(
    NodeKind::ConvTranspose2D,
    CONV_PARAMS,
    CONV_REQUIRED,
    &[("stride", ParamDefault::Int(2)), ("padding", ParamDefault::Int(1))],
);
static MAX_POOL2D: NodeSchema = single(NodeKind::MaxPool2D, POOL_PARAMS, POOL_REQUIRED, POOL_DEFAULTS);
static AVG_POOL2D: NodeSchema = single(NodeKind::AvgPool2D, POOL_PARAMS, POOL_REQUIRED, POOL_DEFAULTS);
static ADAPTIVE_AVG_POOL2D: NodeSchema = single(
    NodeKind::AdaptiveAvgPool2D,
    &["output_size"],
    &["output_size"],
    &[("output_size", ParamDefault::Int(1))],
);

static LINEAR: NodeSchema = single(
    NodeKind::Linear,
    &["in_features", "out_features"],
    &["in_features", "out_features"],
    NO_DEFAULTS,
);
static FLATTEN: NodeSchema = single(NodeKind::Flatten, NONE, NONE, NO_DEFAULTS);

static LSTM: NodeSchema = single(NodeKind::Lstm, GATED_PARAMS, RECURRENT_REQUIRED, GATED_DEFAULTS);
static GRU: NodeSchema = single(NodeKind::Gru, GATED_PARAMS, RECURRENT_REQUIRED, GATED_DEFAULTS);
static RNN: NodeSchema = single(
    NodeKind::Rnn,
    &["input_size", "hidden_size", "num_layers"],
    RECURRENT_REQUIRED,
    &[("num_layers", ParamDefault::Int(1))],
);

static BATCH_NORM: NodeSchema = single(NodeKind::BatchNorm, &["num_features"], &["num_features"], NO_DEFAULTS);
static LAYER_NORM: NodeSchema = single(
    NodeKind::LayerNorm,
    &["normalized_shape"],
    &["normalized_shape"],
    NO_DEFAULTS,
);
static GROUP_NORM: NodeSchema = single(
    NodeKind::GroupNorm,
    &["num_groups", "num_channels"],
    &["num_groups", "num_channels"],
    NO_DEFAULTS,
);
static INSTANCE_NORM: NodeSchema = single(
    NodeKind::InstanceNorm,
    &["num_features"],
    &["num_features"],
    NO_DEFAULTS,
);

static RELU: NodeSchema = single(NodeKind::Relu, NONE, NONE, NO_DEFAULTS);
static LEAKY_RELU: NodeSchema = single(
    NodeKind::LeakyRelu,
    &["negative_slope"],
    NONE,
    &[("negative_slope", ParamDefault::Float(0.01))],
);
static SIGMOID: NodeSchema = single(NodeKind::Sigmoid, NONE, NONE, NO_DEFAULTS);
static TANH: NodeSchema = single(NodeKind::Tanh, NONE, NONE, NO_DEFAULTS);
static GELU: NodeSchema = single(NodeKind::Gelu, NONE, NONE, NO_DEFAULTS);
static ELU: NodeSchema = single(NodeKind::Elu, &["alpha"], NONE, &[("alpha", ParamDefault::Float(1.0))]);
static SILU: NodeSchema = single(NodeKind::Silu, NONE, NONE, NO_DEFAULTS);
static SOFTMAX: NodeSchema = single(NodeKind::Softmax, &["dim"], NONE, &[("dim", ParamDefault::Int(1))]);

static DROPOUT: NodeSchema = single(NodeKind::Dropout, &["p"], NONE, &[("p", ParamDefault::Float(0.5))]);
static RESHAPE: NodeSchema = single(NodeKind::Reshape, &["target_shape"], &["target_shape"], NO_DEFAULTS);
static CONCATENATE: NodeSchema = NodeSchema {
    kind: NodeKind::Concatenate,
    params: &["dim"],
    required: NONE,
    defaults: &[("dim", ParamDefault::Int(1))],
    inputs: Arity::Variadic,
    outputs: 1,
};
static ADD: NodeSchema = NodeSchema {
    kind: NodeKind::Add,
    params: NONE,
    required: NONE,
    defaults: NO_DEFAULTS,
    inputs: Arity::Variadic,
    outputs: 1,
};
static MULTIPLY: NodeSchema = NodeSchema {
    kind: NodeKind::Multiply,
    params: NONE,
    required: NONE,
    defaults: NO_DEFAULTS,
    inputs: Arity::Variadic,
    outputs: 1,
};
static EMBEDDING: NodeSchema = single(
    NodeKind::Embedding,
    &["num_embeddings", "embedding_dim"],
    &["num_embeddings", "embedding_dim"],
    NO_DEFAULTS,
);

static MULTI_HEAD_ATTENTION: NodeSchema = single(
    NodeKind::MultiHeadAttention,
    &["embed_dim", "num_heads"],
    &["embed_dim", "num_heads"],
    NO_DEFAULTS,
);

/// Look up the schema for a kind.
pub fn schema_for(kind: NodeKind) -> &'static NodeSchema {
    match kind {
        NodeKind::Input => &INPUT,
        NodeKind::Output => &OUTPUT,
        NodeKind::Conv1D => &CONV1D,
        NodeKind::Conv2D => &CONV2D,
        NodeKind::Conv3D => &CONV3D,
        NodeKind::ConvTranspose2D => &CONV_TRANSPOSE2D,
        NodeKind::MaxPool2D => &MAX_POOL2D,
        NodeKind::AvgPool2D => &AVG_POOL2D,
        NodeKind::AdaptiveAvgPool2D => &ADAPTIVE_AVG_POOL2D,
        NodeKind::Linear => &LINEAR,
        NodeKind::Flatten => &FLATTEN,
        NodeKind::Lstm => &LSTM,
        NodeKind::Gru => &GRU,
        NodeKind::Rnn => &RNN,
        NodeKind::BatchNorm => &BATCH_NORM,
        NodeKind::LayerNorm => &LAYER_NORM,
        NodeKind::GroupNorm => &GROUP_NORM,
        NodeKind::InstanceNorm => &INSTANCE_NORM,
        NodeKind::Relu => &RELU,
        NodeKind::LeakyRelu => &LEAKY_RELU,
        NodeKind::Sigmoid => &SIGMOID,
        NodeKind::Tanh => &TANH,
        NodeKind::Gelu => &GELU,
        NodeKind::Elu => &ELU,
        NodeKind::Silu => &SILU,
        NodeKind::Softmax => &SOFTMAX,
        NodeKind::Dropout => &DROPOUT,
        NodeKind::Reshape => &RESHAPE,
        NodeKind::Concatenate => &CONCATENATE,
        NodeKind::Add => &ADD,
        NodeKind::Multiply => &MULTIPLY,
        NodeKind::Embedding => &EMBEDDING,
        NodeKind::MultiHeadAttention => &MULTI_HEAD_ATTENTION,
    }
}

/// Every schema, in `NodeKind::ALL` order.
pub fn all_schemas() -> impl Iterator<Item = &'static NodeSchema> {
    NodeKind::ALL.into_iter().map(schema_for)
}
