//! Call-scoped wrapper over a libsass compilation context.
//!
//! A context is created for exactly one compile and destroyed by `Drop`, so
//! every exit path (success, compiler failure, early `?`) releases it.

use crate::error::{Result, SassError};
use crate::options::ContextOptions;
use crate::types::OutputStyle;
use sass_sys as ffi;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr::NonNull;

enum Handle {
    Data(NonNull<ffi::Sass_Data_Context>),
    File(NonNull<ffi::Sass_File_Context>),
}

/// Which libsass entry point a context was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Data,
    File,
}

pub struct CompilationContext {
    handle: Handle,
    ctx: NonNull<ffi::Sass_Context>,
}

impl CompilationContext {
    /// Builds a data-backed context holding its own copy of `source`.
    pub fn for_source(source: &str) -> Result<Self> {
        let source = to_c_string("source", source)?;

        // sass_make_data_context frees the source itself, so it must come
        // from libsass' allocator.
        let owned = unsafe { ffi::sass_copy_c_string(source.as_ptr()) };
        if owned.is_null() {
            return Err(SassError::compilation("libsass could not copy the source"));
        }
        let raw = unsafe { ffi::sass_make_data_context(owned) };
        let data = NonNull::new(raw)
            .ok_or_else(|| SassError::compilation("libsass could not create a data context"))?;
        let ctx = unsafe { ffi::sass_data_context_get_context(data.as_ptr()) };

        let context = Self {
            handle: Handle::Data(data),
            ctx: NonNull::new(ctx).ok_or_else(|| {
                unsafe { ffi::sass_delete_data_context(data.as_ptr()) };
                SassError::compilation("libsass returned no context for data input")
            })?,
        };
        log::debug!("Created data context ({} bytes of source)", source.as_bytes().len());
        Ok(context)
    }

    /// Builds a file-backed context. libsass copies the path.
    pub fn for_file(path: &str) -> Result<Self> {
        let c_path = to_c_string("path", path)?;
        let raw = unsafe { ffi::sass_make_file_context(c_path.as_ptr()) };
        let file = NonNull::new(raw)
            .ok_or_else(|| SassError::compilation("libsass could not create a file context"))?;
        let ctx = unsafe { ffi::sass_file_context_get_context(file.as_ptr()) };

        let context = Self {
            handle: Handle::File(file),
            ctx: NonNull::new(ctx).ok_or_else(|| {
                unsafe { ffi::sass_delete_file_context(file.as_ptr()) };
                SassError::compilation("libsass returned no context for file input")
            })?,
        };
        log::debug!("Created file context for {}", path);
        Ok(context)
    }

    pub fn kind(&self) -> ContextKind {
        match self.handle {
            Handle::Data(_) => ContextKind::Data,
            Handle::File(_) => ContextKind::File,
        }
    }

    /// Copies `options` into the context's option object.
    pub fn apply(&mut self, options: &ContextOptions) -> Result<()> {
        log::trace!("Applying context options: {:?}", options);

        let include_path = options
            .include_path
            .as_deref()
            .map(|p| to_c_string("include path", p))
            .transpose()?;
        let map_file = options
            .source_map_file
            .as_deref()
            .map(|p| to_c_string("source map path", p))
            .transpose()?;
        let map_root = options
            .source_map_root
            .as_deref()
            .map(|p| to_c_string("source map root", p))
            .transpose()?;

        unsafe {
            let opts = ffi::sass_context_get_options(self.ctx.as_ptr());
            if opts.is_null() {
                return Err(SassError::compilation("libsass context has no options"));
            }

            ffi::sass_option_set_precision(opts, options.precision);
            ffi::sass_option_set_output_style(opts, native_style(options.output_style));
            if let Some(include_path) = &include_path {
                ffi::sass_option_set_include_path(opts, include_path.as_ptr());
            }
            ffi::sass_option_set_source_comments(opts, options.source_comments);
            ffi::sass_option_set_omit_source_map_url(opts, options.omit_source_map_url);
            ffi::sass_option_set_source_map_embed(opts, options.source_map_embed);
            ffi::sass_option_set_source_map_contents(opts, options.source_map_contents);
            if let Some(map_file) = &map_file {
                ffi::sass_option_set_source_map_file(opts, map_file.as_ptr());
            }
            if let Some(map_root) = &map_root {
                ffi::sass_option_set_source_map_root(opts, map_root.as_ptr());
            }
        }

        Ok(())
    }

    /// Runs the blocking compile. A non-zero status becomes a
    /// `SassError::Compilation` carrying libsass' message unchanged.
    pub fn compile(&mut self) -> Result<()> {
        let status = unsafe {
            match self.handle {
                Handle::Data(data) => ffi::sass_compile_data_context(data.as_ptr()),
                Handle::File(file) => ffi::sass_compile_file_context(file.as_ptr()),
            }
        };

        if status == 0 {
            log::debug!("libsass finished {:?} compile", self.kind());
            return Ok(());
        }

        let message = self
            .error_message()
            .unwrap_or_else(|| format!("libsass failed with status {}", status));
        log::debug!("libsass reported status {}", status);
        Err(SassError::Compilation { message })
    }

    pub fn output_string(&self) -> Option<String> {
        unsafe { copy_c_str(ffi::sass_context_get_output_string(self.ctx.as_ptr())) }
    }

    pub fn source_map_string(&self) -> Option<String> {
        unsafe { copy_c_str(ffi::sass_context_get_source_map_string(self.ctx.as_ptr())) }
    }

    pub fn error_status(&self) -> i32 {
        unsafe { ffi::sass_context_get_error_status(self.ctx.as_ptr()) }
    }

    pub fn error_message(&self) -> Option<String> {
        unsafe { copy_c_str(ffi::sass_context_get_error_message(self.ctx.as_ptr())) }
    }
}

impl Drop for CompilationContext {
    fn drop(&mut self) {
        unsafe {
            match self.handle {
                Handle::Data(data) => ffi::sass_delete_data_context(data.as_ptr()),
                Handle::File(file) => ffi::sass_delete_file_context(file.as_ptr()),
            }
        }
    }
}

fn native_style(style: OutputStyle) -> ffi::Sass_Output_Style {
    match style {
        OutputStyle::Nested => ffi::Sass_Output_Style::SASS_STYLE_NESTED,
        OutputStyle::Expanded => ffi::Sass_Output_Style::SASS_STYLE_EXPANDED,
        OutputStyle::Compact => ffi::Sass_Output_Style::SASS_STYLE_COMPACT,
        OutputStyle::Compressed => ffi::Sass_Output_Style::SASS_STYLE_COMPRESSED,
    }
}

/// Version string reported by the linked libsass.
pub fn library_version() -> String {
    unsafe { copy_c_str(ffi::libsass_version()) }.unwrap_or_default()
}

fn to_c_string(what: &str, value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|e| SassError::invalid_argument(format!("{} contains a NUL byte at {}", what, e.nul_position())))
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
unsafe fn copy_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}
