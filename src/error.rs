pub type SlidereelResult<T> = Result<T, SlidereelError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidereelError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("no input found: {0}")]
    NoInput(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidereelError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn no_input(msg: impl Into<String>) -> Self {
        Self::NoInput(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SlidereelError::usage("x")
                .to_string()
                .contains("usage error:")
        );
        assert!(
            SlidereelError::no_input("x")
                .to_string()
                .contains("no input found:")
        );
        assert!(
            SlidereelError::invalid_argument("x")
                .to_string()
                .contains("invalid argument:")
        );
        assert!(
            SlidereelError::empty_input("x")
                .to_string()
                .contains("empty input:")
        );
        assert!(
            SlidereelError::encoding("x")
                .to_string()
                .contains("encoding error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SlidereelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
