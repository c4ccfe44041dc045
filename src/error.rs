use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("invalid threshold count: {count} (must be >= 1)")]
    InvalidThresholdCount { count: usize },

    #[error("degenerate canvas: bounded width={width}, bounded height={height}")]
    DegenerateCanvas { width: f64, height: f64 },

    #[error("accessor `{accessor}` produced no comparable scalar values")]
    AccessorType { accessor: String },

    #[error("chart type requires a `{axis}` accessor")]
    MissingAccessor { axis: &'static str },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
