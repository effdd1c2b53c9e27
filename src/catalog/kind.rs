//! The closed set of layer kinds a graph node can declare.
//! SYNC NOTE: Wire names here must match the node `type` strings produced by
//! the editor palette. Adding a kind means adding a schema in `schema.rs`;
//! the exhaustive matches there and in `transfer.rs`/`weights.rs` enforce it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    // Input/Output
    Input,
    Output,

    // Convolutional
    Conv1D,
    Conv2D,
    Conv3D,
    ConvTranspose2D,
    MaxPool2D,
    AvgPool2D,
    AdaptiveAvgPool2D,

    // Fully connected
    Linear,
    Flatten,

    // Recurrent
    Lstm,
    Gru,
    Rnn,

    // Normalization
    BatchNorm,
    LayerNorm,
    GroupNorm,
    InstanceNorm,

    // Activation
    Relu,
    LeakyRelu,
    Sigmoid,
    Tanh,
    Gelu,
    Elu,
    Silu,
    Softmax,

    // Utility
    Dropout,
    Reshape,
    Concatenate,
    Add,
    Multiply,
    Embedding,

    // Attention
    MultiHeadAttention,
}

impl NodeKind {
    pub const ALL: [NodeKind; 33] = [
        NodeKind::Input,
        NodeKind::Output,
        NodeKind::Conv1D,
        NodeKind::Conv2D,
        NodeKind::Conv3D,
        NodeKind::ConvTranspose2D,
        NodeKind::MaxPool2D,
        NodeKind::AvgPool2D,
        NodeKind::AdaptiveAvgPool2D,
        NodeKind::Linear,
        NodeKind::Flatten,
        NodeKind::Lstm,
        NodeKind::Gru,
        NodeKind::Rnn,
        NodeKind::BatchNorm,
        NodeKind::LayerNorm,
        NodeKind::GroupNorm,
        NodeKind::InstanceNorm,
        NodeKind::Relu,
        NodeKind::LeakyRelu,
        NodeKind::Sigmoid,
        NodeKind::Tanh,
        NodeKind::Gelu,
        NodeKind::Elu,
        NodeKind::Silu,
        NodeKind::Softmax,
        NodeKind::Dropout,
        NodeKind::Reshape,
        NodeKind::Concatenate,
        NodeKind::Add,
        NodeKind::Multiply,
        NodeKind::Embedding,
        NodeKind::MultiHeadAttention,
    ];

    /// The `type` string the editor sends for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Conv1D => "conv1d",
            NodeKind::Conv2D => "conv2d",
            NodeKind::Conv3D => "conv3d",
            NodeKind::ConvTranspose2D => "convtranspose2d",
            NodeKind::MaxPool2D => "maxpool2d",
            NodeKind::AvgPool2D => "avgpool2d",
            NodeKind::AdaptiveAvgPool2D => "adaptiveavgpool2d",
            NodeKind::Linear => "linear",
            NodeKind::Flatten => "flatten",
            NodeKind::Lstm => "lstm",
            NodeKind::Gru => "gru",
            NodeKind::Rnn => "rnn",
            NodeKind::BatchNorm => "batchnorm",
            NodeKind::LayerNorm => "layernorm",
            NodeKind::GroupNorm => "groupnorm",
            NodeKind::InstanceNorm => "instancenorm",
            NodeKind::Relu => "relu",
            NodeKind::LeakyRelu => "leakyrelu",
            NodeKind::Sigmoid => "sigmoid",
            NodeKind::Tanh => "tanh",
            NodeKind::Gelu => "gelu",
            NodeKind::Elu => "elu",
            NodeKind::Silu => "silu",
            NodeKind::Softmax => "softmax",
            NodeKind::Dropout => "dropout",
            NodeKind::Reshape => "reshape",
            NodeKind::Concatenate => "concatenate",
            NodeKind::Add => "add",
            NodeKind::Multiply => "multiply",
            NodeKind::Embedding => "embedding",
            NodeKind::MultiHeadAttention => "multiheadattention",
        }
    }

    /// Resolve a wire `type` string. Matching ignores ASCII case, so `Conv2D`
    /// and `conv2d` name the same kind.
    pub fn from_type_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.type_name().eq_ignore_ascii_case(name))
    }

    /// Kinds the forward pass applies as plain functions, without a named
    /// layer attribute.
    pub fn is_functional(self) -> bool {
        matches!(
            self,
            NodeKind::Input | NodeKind::Relu | NodeKind::Flatten | NodeKind::Softmax
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
