//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use dataset_explorer::ExplorerError;
    use dataset_explorer::io::error::{computation_error, invalid_parameter, render_error};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ExplorerError::FileSystem {
            path: "/tmp/data".into(),
            operation: "read directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read directory"));
        assert!(error.to_string().contains("/tmp/data"));
    }

    // Tests ImageLoad error names the file and chains the decoder error
    // Verified by excluding path from message
    #[test]
    fn test_image_load_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "bad header",
        ));
        let error = ExplorerError::ImageLoad {
            path: PathBuf::from("/data/cats/1.png"),
            source: image_error,
        };

        assert!(error.to_string().contains("/data/cats/1.png"));
        assert!(error.source().is_some());
    }

    // Tests EmptyDataset error names the root
    // Verified by omitting the root from message
    #[test]
    fn test_empty_dataset_error() {
        let error = ExplorerError::EmptyDataset {
            root: PathBuf::from("/data"),
        };

        assert!(error.to_string().contains("/data"));
        assert!(error.source().is_none());
    }

    // Tests helper constructors fill every field
    // Verified by omitting value from message
    #[test]
    fn test_helper_constructors() {
        let invalid = invalid_parameter("rows", &0, &"must be at least 1");
        let message = invalid.to_string();
        assert!(message.contains("rows"));
        assert!(message.contains('0'));
        assert!(message.contains("must be at least 1"));

        let computation = computation_error("color histogram", &"zero area");
        assert!(matches!(
            computation,
            ExplorerError::Computation { operation: "color histogram", .. }
        ));

        let render = render_error("/out/mosaic.svg", &"disk full");
        assert!(render.to_string().contains("/out/mosaic.svg"));
        assert!(render.to_string().contains("disk full"));
    }

    // Tests conversions from library errors
    // Verified by mapping io errors to computation errors
    #[test]
    fn test_from_conversions() {
        let from_io: ExplorerError = std::io::Error::other("boom").into();
        assert!(matches!(from_io, ExplorerError::FileSystem { .. }));

        let from_image: ExplorerError = image::ImageError::IoError(std::io::Error::other("boom")).into();
        assert!(matches!(from_image, ExplorerError::ImageLoad { .. }));
    }
}
