//! Ruby entry point
//!
//! `require "fibonacci"` loads this library and calls `Init_fibonacci`,
//! which defines `Extension::Fibonacci.nth_fibonacci(n)` and
//! `Extension::Fibonacci::VERSION`.
//!
//! Arguments go through [`crate::convert`], so a Ruby caller sees the same
//! `RangeError`/`TypeError` behavior as `NUM2INT`, including the implicit
//! `to_int` conversion (`nth_fibonacci(Rational(21, 2))` is fib(10)).

#![cfg(feature = "ruby")]

use crate::VERSION;
use crate::config::ExtensionConfig;
use crate::convert::{ConversionError, HostValue};
use crate::registry::{HostRuntime, NTH_FIBONACCI, NativeMethod, call_nth_fibonacci, register};
use magnus::{Error, Float, Integer, RClass, RModule, Ruby, Value, function, prelude::*};
use tracing::debug;

/// [`HostRuntime`] backed by the running Ruby VM
struct RubyHost<'a> {
    ruby: &'a Ruby,
    /// Last class defined, where `VERSION` is attached after registration
    class: Option<RClass>,
}

impl HostRuntime for RubyHost<'_> {
    type Module = RModule;
    type Class = RClass;
    type Error = Error;

    fn define_module(&mut self, name: &str) -> Result<RModule, Error> {
        self.ruby.define_module(name)
    }

    fn define_class_under(&mut self, module: &RModule, name: &str) -> Result<RClass, Error> {
        let class = module.define_class(name, self.ruby.class_object())?;
        self.class = Some(class);
        Ok(class)
    }

    /// Binds by arity only: magnus needs a concrete fn item, so the method
    /// is always `ruby_nth_fibonacci`, which runs the same marshaling as
    /// `NTH_FIBONACCI.handler`.
    fn define_singleton_method(
        &mut self,
        class: &RClass,
        name: &str,
        method: NativeMethod,
    ) -> Result<(), Error> {
        if method.arity != NTH_FIBONACCI.arity {
            return Err(Error::new(
                self.ruby.exception_arg_error(),
                format!(
                    "{}: unsupported arity {} (expected {})",
                    name, method.arity, NTH_FIBONACCI.arity
                ),
            ));
        }
        debug!(
            method = name,
            symbol = method.symbol,
            "binding singleton method to ruby_nth_fibonacci"
        );
        class.define_singleton_method(name, function!(ruby_nth_fibonacci, 1))
    }
}

fn host_value(ruby: &Ruby, value: Value) -> Result<HostValue, Error> {
    if let Some(int) = Integer::from_value(value) {
        return Ok(HostValue::Integer(int.to_i64()?));
    }
    if let Some(float) = Float::from_value(value) {
        return Ok(HostValue::Float(float.to_f64()));
    }
    if value.is_nil() {
        return Ok(HostValue::Nil);
    }
    if value.is_kind_of(ruby.class_true_class()) {
        return Ok(HostValue::boolean(true));
    }
    if value.is_kind_of(ruby.class_false_class()) {
        return Ok(HostValue::boolean(false));
    }
    if value.respond_to("to_int", false)? {
        let converted: Value = value.funcall("to_int", ())?;
        if let Some(int) = Integer::from_value(converted) {
            return Ok(HostValue::Integer(int.to_i64()?));
        }
        return Err(Error::new(
            ruby.exception_type_error(),
            format!(
                "can't convert {} to Integer ({}#to_int gives {})",
                value.class(),
                value.class(),
                converted.class()
            ),
        ));
    }
    Ok(HostValue::Other(value.class().to_string()))
}

fn raise(ruby: &Ruby, error: ConversionError) -> Error {
    let class = match error {
        ConversionError::TypeMismatch { .. } => ruby.exception_type_error(),
        ConversionError::OutOfRange { .. } | ConversionError::FloatOutOfRange { .. } => {
            ruby.exception_range_error()
        }
    };
    Error::new(class, error.to_string())
}

fn ruby_nth_fibonacci(ruby: &Ruby, n: Value) -> Result<i64, Error> {
    match call_nth_fibonacci(host_value(ruby, n)?) {
        Ok(HostValue::Integer(result)) => Ok(result),
        Ok(other) => Err(Error::new(
            ruby.exception_runtime_error(),
            format!("nth_fibonacci: unexpected result {:?}", other),
        )),
        Err(e) => Err(raise(ruby, e)),
    }
}

#[magnus::init(name = "fibonacci")]
fn init(ruby: &Ruby) -> Result<(), Error> {
    let mut host = RubyHost { ruby, class: None };
    let registration = register(&mut host, &ExtensionConfig::default())?;
    if let Some(class) = host.class {
        class.const_set("VERSION", VERSION)?;
    }
    debug!(method = %registration.method_path(), version = VERSION, "fibonacci extension loaded");
    Ok(())
}
