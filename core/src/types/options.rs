/// Configuration for a batch annotation run
///
/// # Example
///
/// ```
/// use usprobe_core::AnnotatorOptions;
///
/// let options = AnnotatorOptions::default()
///     .recursive(true)
///     .echo_json(false);
///
/// assert!(options.recursive);
/// assert!(!options.echo_json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorOptions {
    /// Walk subdirectories when collecting DICOM files
    pub recursive: bool,

    /// Print each updated metadata record after it is saved
    pub echo_json: bool,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            echo_json: true, // Default: show the updated record like a reviewer expects
        }
    }
}

impl AnnotatorOptions {
    /// Builder: Walk subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Builder: Print updated records
    pub fn echo_json(mut self, echo: bool) -> Self {
        self.echo_json = echo;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = AnnotatorOptions::default();
        assert!(!options.recursive);
        assert!(options.echo_json);
    }

    #[test]
    fn test_builder_chain() {
        let options = AnnotatorOptions::default().recursive(true).echo_json(false);
        assert_eq!(
            options,
            AnnotatorOptions {
                recursive: true,
                echo_json: false,
            }
        );
    }
}
