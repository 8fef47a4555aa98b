//! Engine configuration.

/// Immutable engine configuration, passed to the constructor.
///
/// Classic sfxr tools keep these as free module globals; here they are an
/// explicit value so independent engines can run with different settings
/// and tests can pin them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Global output scale applied before quantization.
    pub master_volume: f64,
    /// Sub-samples generated per internal tick.
    pub oversampling: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            oversampling: 8,
        }
    }
}

impl SynthConfig {
    /// Creates a configuration with a custom master volume.
    pub fn with_master_volume(master_volume: f64) -> Self {
        Self {
            master_volume,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthConfig::default();
        assert_eq!(config.master_volume, 1.0);
        assert_eq!(config.oversampling, 8);
    }
}
