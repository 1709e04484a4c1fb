//! Registration of the extension with a host runtime
//!
//! A host exposes three operations (define a module, define a class under
//! it, attach a singleton method) through [`HostRuntime`]. [`register`]
//! drives them in order with the names from [`ExtensionConfig`].

use crate::config::ExtensionConfig;
use crate::convert::{ConversionError, HostValue, int_from_host, int_to_host};
use fibext_core::nth_fibonacci;
use std::fmt;
use tracing::debug;

/// Host-side callable for a singleton method
pub type Handler = fn(HostValue) -> Result<HostValue, ConversionError>;

/// A native method the extension attaches to its class
#[derive(Clone, Copy)]
pub struct NativeMethod {
    /// Number of host arguments
    pub arity: usize,
    /// Exported C symbol implementing the method
    pub symbol: &'static str,
    /// Marshaling shim a host can call directly
    pub handler: Handler,
}

impl fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMethod")
            .field("arity", &self.arity)
            .field("symbol", &self.symbol)
            .finish_non_exhaustive()
    }
}

/// The one method this extension provides
pub const NTH_FIBONACCI: NativeMethod = NativeMethod {
    arity: 1,
    symbol: "fibext_nth_fibonacci_long",
    handler: call_nth_fibonacci,
};

/// Convert the argument, compute, convert the result back
pub fn call_nth_fibonacci(value: HostValue) -> Result<HostValue, ConversionError> {
    let n = int_from_host(&value)?;
    Ok(int_to_host(nth_fibonacci(n)))
}

/// The operations a host runtime provides for defining the extension
pub trait HostRuntime {
    type Module;
    type Class;
    type Error;

    /// Define (or reopen) a top-level module
    fn define_module(&mut self, name: &str) -> Result<Self::Module, Self::Error>;

    /// Define (or reopen) a class nested in `module`
    fn define_class_under(
        &mut self,
        module: &Self::Module,
        name: &str,
    ) -> Result<Self::Class, Self::Error>;

    /// Attach a class-level method
    fn define_singleton_method(
        &mut self,
        class: &Self::Class,
        name: &str,
        method: NativeMethod,
    ) -> Result<(), Self::Error>;
}

/// What [`register`] defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub module: String,
    pub class: String,
    pub method: String,
    pub arity: usize,
}

impl Registration {
    /// `Module::Class.method`
    pub fn method_path(&self) -> String {
        format!("{}::{}.{}", self.module, self.class, self.method)
    }
}

/// Define the module, the class under it, and the singleton method
///
/// Stops at the first host error. Names are not re-validated here; call
/// [`ExtensionConfig::validate`] first if the config is untrusted.
pub fn register<H: HostRuntime>(
    host: &mut H,
    config: &ExtensionConfig,
) -> Result<Registration, H::Error> {
    debug!(module = %config.module, "defining module");
    let module = host.define_module(&config.module)?;

    debug!(class = %config.class, "defining class");
    let class = host.define_class_under(&module, &config.class)?;

    debug!(
        method = %config.method,
        arity = NTH_FIBONACCI.arity,
        symbol = NTH_FIBONACCI.symbol,
        "defining singleton method"
    );
    host.define_singleton_method(&class, &config.method, NTH_FIBONACCI)?;

    Ok(Registration {
        module: config.module.clone(),
        class: config.class.clone(),
        method: config.method.clone(),
        arity: NTH_FIBONACCI.arity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_nth_fibonacci() {
        assert_eq!(
            call_nth_fibonacci(HostValue::Integer(20)),
            Ok(HostValue::Integer(6765))
        );
        assert_eq!(
            call_nth_fibonacci(HostValue::Float(10.5)),
            Ok(HostValue::Integer(55))
        );
    }

    #[test]
    fn test_call_nth_fibonacci_negative() {
        assert_eq!(
            call_nth_fibonacci(HostValue::Integer(-3)),
            Ok(HostValue::Integer(-3))
        );
    }

    #[test]
    fn test_call_nth_fibonacci_rejects_nil() {
        let err = call_nth_fibonacci(HostValue::Nil).unwrap_err();
        assert_eq!(err.exception_class(), "TypeError");
    }

    #[test]
    fn test_method_descriptor() {
        assert_eq!(NTH_FIBONACCI.arity, 1);
        assert_eq!(NTH_FIBONACCI.symbol, "fibext_nth_fibonacci_long");
        assert_eq!(
            (NTH_FIBONACCI.handler)(HostValue::Integer(1)),
            Ok(HostValue::Integer(1))
        );
        assert!(format!("{:?}", NTH_FIBONACCI).contains("fibext_nth_fibonacci_long"));
    }

    #[test]
    fn test_method_path() {
        let registration = Registration {
            module: "Extension".to_string(),
            class: "Fibonacci".to_string(),
            method: "nth_fibonacci".to_string(),
            arity: 1,
        };
        assert_eq!(
            registration.method_path(),
            "Extension::Fibonacci.nth_fibonacci"
        );
    }
}
