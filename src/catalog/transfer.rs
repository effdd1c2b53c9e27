//! Per-kind shape transfer functions.

use thiserror::Error;

use super::kind::NodeKind;
use super::params::Params;
use super::schema::schema_for;

/// Tensor dimensions, batch first.
pub type Shape = Vec<usize>;

/// Why a transfer function could not produce an output shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Input node missing shape")]
    MissingInputShape,

    #[error("Input shape must be a list of non-negative integers")]
    MalformedInputShape,

    #[error("no input shape to propagate")]
    NoOperand,

    #[error("{kind} expects an input of rank {expected}, got {actual:?}")]
    RankMismatch {
        kind: NodeKind,
        expected: usize,
        actual: Shape,
    },

    #[error("{kind} expects an input with a batch dimension, got an empty shape")]
    MissingBatchDimension { kind: NodeKind },

    #[error("parameter '{0}' must be a positive integer")]
    InvalidParam(&'static str),

    #[error("parameter '{0}' must be a non-negative integer")]
    NegativeParam(&'static str),

    #[error("derived {axis} dimension is {value}, must be positive")]
    NonPositiveDimension { axis: &'static str, value: i64 },

    #[error("flattened dimension overflows")]
    Overflow,
}

/// Compute the output shape of a `kind` node.
///
/// `inputs` holds the shapes of the node's predecessors; every kind except
/// `Input` reads only the first one. Kinds without a dedicated rule pass the
/// first input through unchanged.
pub fn shape_transfer(kind: NodeKind, inputs: &[Shape], params: &Params) -> Result<Shape, ShapeError> {
    match kind {
        NodeKind::Input => input_shape(params),
        NodeKind::Linear => {
            let input = first(inputs)?;
            let batch = *input
                .first()
                .ok_or(ShapeError::MissingBatchDimension { kind })?;
            let out_features = positive(params, "out_features")?;
            Ok(vec![batch, out_features])
        }
        NodeKind::Conv2D => conv2d(first(inputs)?, params),
        NodeKind::Flatten => {
            let input = first(inputs)?;
            let (&batch, rest) = input
                .split_first()
                .ok_or(ShapeError::MissingBatchDimension { kind })?;
            let flat = rest
                .iter()
                .try_fold(1usize, |acc, &d| acc.checked_mul(d))
                .ok_or(ShapeError::Overflow)?;
            Ok(vec![batch, flat])
        }
        NodeKind::Output
        | NodeKind::Conv1D
        | NodeKind::Conv3D
        | NodeKind::ConvTranspose2D
        | NodeKind::MaxPool2D
        | NodeKind::AvgPool2D
        | NodeKind::AdaptiveAvgPool2D
        | NodeKind::Lstm
        | NodeKind::Gru
        | NodeKind::Rnn
        | NodeKind::BatchNorm
        | NodeKind::LayerNorm
        | NodeKind::GroupNorm
        | NodeKind::InstanceNorm
        | NodeKind::Relu
        | NodeKind::LeakyRelu
        | NodeKind::Sigmoid
        | NodeKind::Tanh
        | NodeKind::Gelu
        | NodeKind::Elu
        | NodeKind::Silu
        | NodeKind::Softmax
        | NodeKind::Dropout
        | NodeKind::Reshape
        | NodeKind::Concatenate
        | NodeKind::Add
        | NodeKind::Multiply
        | NodeKind::Embedding
        | NodeKind::MultiHeadAttention => first(inputs).cloned(),
    }
}

fn first(inputs: &[Shape]) -> Result<&Shape, ShapeError> {
    inputs.first().ok_or(ShapeError::NoOperand)
}

fn input_shape(params: &Params) -> Result<Shape, ShapeError> {
    let dims = params
        .get("shape")
        .ok_or(ShapeError::MissingInputShape)?
        .as_array()
        .ok_or(ShapeError::MalformedInputShape)?;
    if dims.is_empty() {
        return Err(ShapeError::MissingInputShape);
    }
    dims.iter()
        .map(|d| {
            d.as_u64()
                .and_then(|d| usize::try_from(d).ok())
                .ok_or(ShapeError::MalformedInputShape)
        })
        .collect()
}

fn positive(params: &Params, name: &'static str) -> Result<usize, ShapeError> {
    params
        .integer(name)
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(ShapeError::InvalidParam(name))
}

fn conv2d(input: &Shape, params: &Params) -> Result<Shape, ShapeError> {
    let &[batch, _, h, w] = input.as_slice() else {
        return Err(ShapeError::RankMismatch {
            kind: NodeKind::Conv2D,
            expected: 4,
            actual: input.clone(),
        });
    };

    let schema = schema_for(NodeKind::Conv2D);
    let out_channels = positive(params, "out_channels")?;
    let kernel = positive(params, "kernel_size")? as i64;
    let stride = params
        .integer_or_default(schema, "stride")
        .filter(|&s| s > 0)
        .ok_or(ShapeError::InvalidParam("stride"))?;
    let padding = params
        .integer_or_default(schema, "padding")
        .filter(|&p| p >= 0)
        .ok_or(ShapeError::NegativeParam("padding"))?;

    let h_out = conv_dim(h, kernel, stride, padding, "height")?;
    let w_out = conv_dim(w, kernel, stride, padding, "width")?;
    Ok(vec![batch, out_channels, h_out, w_out])
}

/// `floor((size + 2*padding - kernel) / stride) + 1`, rejecting results < 1.
fn conv_dim(
    size: usize,
    kernel: i64,
    stride: i64,
    padding: i64,
    axis: &'static str,
) -> Result<usize, ShapeError> {
    let size = i64::try_from(size).map_err(|_| ShapeError::Overflow)?;
    let span = size
        .checked_add(padding.checked_mul(2).ok_or(ShapeError::Overflow)?)
        .and_then(|s| s.checked_sub(kernel))
        .ok_or(ShapeError::Overflow)?;
    let value = span.div_euclid(stride) + 1;
    if value <= 0 {
        return Err(ShapeError::NonPositiveDimension { axis, value });
    }
    usize::try_from(value).map_err(|_| ShapeError::Overflow)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: serde_json::Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn input_returns_declared_shape() {
        let p = params(json!({"shape": [1, 784]}));
        assert_eq!(shape_transfer(NodeKind::Input, &[], &p), Ok(vec![1, 784]));
    }

    #[test]
    fn input_rejects_missing_empty_and_malformed_shapes() {
        assert_eq!(
            shape_transfer(NodeKind::Input, &[], &Params::new()),
            Err(ShapeError::MissingInputShape)
        );
        assert_eq!(
            shape_transfer(NodeKind::Input, &[], &params(json!({"shape": []}))),
            Err(ShapeError::MissingInputShape)
        );
        assert_eq!(
            shape_transfer(NodeKind::Input, &[], &params(json!({"shape": [1, -3]}))),
            Err(ShapeError::MalformedInputShape)
        );
        assert_eq!(
            shape_transfer(NodeKind::Input, &[], &params(json!({"shape": "1x784"}))),
            Err(ShapeError::MalformedInputShape)
        );
    }

    #[test]
    fn linear_replaces_feature_dimension() {
        let p = params(json!({"in_features": 784, "out_features": 128}));
        assert_eq!(shape_transfer(NodeKind::Linear, &[vec![4, 784]], &p), Ok(vec![4, 128]));
    }

    #[test]
    fn linear_does_not_check_incoming_features() {
        let p = params(json!({"in_features": 10, "out_features": 3}));
        assert_eq!(shape_transfer(NodeKind::Linear, &[vec![2, 99]], &p), Ok(vec![2, 3]));
    }

    #[test]
    fn conv2d_valid_padding() {
        let p = params(json!({"in_channels": 1, "out_channels": 32, "kernel_size": 3, "stride": 1, "padding": 0}));
        assert_eq!(
            shape_transfer(NodeKind::Conv2D, &[vec![1, 1, 28, 28]], &p),
            Ok(vec![1, 32, 26, 26])
        );
    }

    #[test]
    fn conv2d_uses_default_stride_and_padding() {
        let p = params(json!({"in_channels": 3, "out_channels": 8, "kernel_size": 5}));
        assert_eq!(
            shape_transfer(NodeKind::Conv2D, &[vec![2, 3, 32, 32]], &p),
            Ok(vec![2, 8, 28, 28])
        );
    }

    #[test]
    fn conv2d_strided_same_padding_floors() {
        let p = params(json!({"in_channels": 3, "out_channels": 16, "kernel_size": 3, "stride": 2, "padding": 1}));
        assert_eq!(
            shape_transfer(NodeKind::Conv2D, &[vec![1, 3, 28, 27]], &p),
            Ok(vec![1, 16, 14, 14])
        );
    }

    #[test]
    fn conv2d_kernel_larger_than_input_fails() {
        let p = params(json!({"in_channels": 1, "out_channels": 4, "kernel_size": 5}));
        assert_eq!(
            shape_transfer(NodeKind::Conv2D, &[vec![1, 1, 3, 3]], &p),
            Err(ShapeError::NonPositiveDimension { axis: "height", value: -1 })
        );
    }

    #[test]
    fn conv2d_requires_rank_four() {
        let p = params(json!({"in_channels": 1, "out_channels": 4, "kernel_size": 3}));
        let err = shape_transfer(NodeKind::Conv2D, &[vec![1, 784]], &p).unwrap_err();
        assert_eq!(err.to_string(), "conv2d expects an input of rank 4, got [1, 784]");
    }

    #[test]
    fn conv2d_rejects_zero_stride() {
        let p = params(json!({"in_channels": 1, "out_channels": 4, "kernel_size": 3, "stride": 0}));
        assert_eq!(
            shape_transfer(NodeKind::Conv2D, &[vec![1, 1, 8, 8]], &p),
            Err(ShapeError::InvalidParam("stride"))
        );
    }

    #[test]
    fn flatten_multiplies_trailing_dimensions() {
        assert_eq!(
            shape_transfer(NodeKind::Flatten, &[vec![8, 32, 26, 26]], &Params::new()),
            Ok(vec![8, 21632])
        );
        assert_eq!(shape_transfer(NodeKind::Flatten, &[vec![8]], &Params::new()), Ok(vec![8, 1]));
    }

    #[test]
    fn other_kinds_are_identity_on_first_input() {
        let shape = vec![1, 16, 10];
        for kind in [NodeKind::Relu, NodeKind::Dropout, NodeKind::Lstm, NodeKind::Add, NodeKind::Output] {
            assert_eq!(shape_transfer(kind, &[shape.clone(), vec![9]], &Params::new()), Ok(shape.clone()));
        }
    }

    #[test]
    fn non_input_kinds_need_an_operand() {
        assert_eq!(
            shape_transfer(NodeKind::Relu, &[], &Params::new()),
            Err(ShapeError::NoOperand)
        );
    }
}
