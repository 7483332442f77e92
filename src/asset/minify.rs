//! Optimization plugins: JS and CSS minification.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use std::fs;
use std::path::Path;

use anyhow::Result;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::plugin::Optimizer;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// Shared plumbing for the two minifiers: unreadable or unparsable input is
/// a clean decline, never a fault.
fn minify_to_slot(
    input: &Path,
    output: &Path,
    minify: impl Fn(&str) -> Option<String>,
) -> Result<bool> {
    let Ok(source) = fs::read_to_string(input) else {
        // Binary content under a text extension; leave it alone
        return Ok(false);
    };
    match minify(&source) {
        Some(code) => {
            fs::write(output, code)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// CSS minifier backed by lightningcss.
pub struct CssMinifier;

impl Optimizer for CssMinifier {
    fn name(&self) -> &'static str {
        "css-minify"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["css"]
    }

    fn run(&self, input: &Path, output: &Path) -> Result<bool> {
        minify_to_slot(input, output, minify_css)
    }
}

/// JavaScript minifier backed by oxc.
pub struct JsMinifier;

impl Optimizer for JsMinifier {
    fn name(&self) -> &'static str {
        "js-minify"
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &["js"]
    }

    fn run(&self, input: &Path, output: &Path) -> Result<bool> {
        minify_to_slot(input, output, minify_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minify_css() {
        let minified = minify_css("body {\n  color: #ff0000;\n}\n").unwrap();
        assert!(minified.len() < "body {\n  color: #ff0000;\n}\n".len());
        assert!(minified.contains("body"));
    }

    #[test]
    fn test_minify_css_invalid() {
        // Stray close brace at the top level is a hard parse error
        assert!(minify_css("}").is_none());
    }

    #[test]
    fn test_minify_js() {
        let source = "function add(first, second) {\n  return first + second;\n}\nexport { add };\n";
        let minified = minify_js(source).unwrap();
        assert!(minified.len() < source.len());
    }

    #[test]
    fn test_minify_js_invalid() {
        assert!(minify_js("function {{{").is_none());
    }

    #[test]
    fn test_css_minifier_writes_slot() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("style.css");
        let output = dir.path().join("slot");
        std::fs::write(&input, "body {  color:  red ; }").unwrap();

        assert!(CssMinifier.run(&input, &output).unwrap());
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.len() < "body {  color:  red ; }".len());
    }

    #[test]
    fn test_css_minifier_declines_garbage() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("style.css");
        let output = dir.path().join("slot");
        std::fs::write(&input, "}").unwrap();

        assert!(!CssMinifier.run(&input, &output).unwrap());
        assert!(!output.exists());
    }
}
