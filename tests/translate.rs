use std::fs;

use dpgen_core::{translate, translate_file, DpgenError, ErrorClass, TranslateConfig};
use pretty_assertions::assert_eq;

fn config(name: &str) -> TranslateConfig {
    TranslateConfig::new().with_module_name(name)
}

#[test]
fn test_adder_to_output() {
    let source = "input Int8 a, b\noutput Int8 c\n\nc = a + b\n";
    let verilog = translate(source, &config("circuit")).unwrap();

    let expected = r#"`timescale 1ns / 1ps

module circuit (
    input Clk, Rst,
    input [7:0] a, b,
    output [7:0] c
);
    wire [7:0] cwire;

    SADD #(.DATAWIDTH(8)) ADD0(a, b, cwire);
    SREG #(.DATAWIDTH(8)) REG0(cwire, Clk, Rst, c);
endmodule
"#;
    assert_eq!(verilog, expected);
}

#[test]
fn test_mixed_width_comparator() {
    let source = "input Int8 a\ninput Int16 b\noutput Int1 c\nc = a > b\n";
    let verilog = translate(source, &config("comp")).unwrap();

    let expected = r#"`timescale 1ns / 1ps

module comp (
    input Clk, Rst,
    input [7:0] a,
    input [15:0] b,
    output c
);
    wire cwire;

    SCOMP #(.DATAWIDTH(16)) COMP0({{8{a[7]}}, a}, b, cwire, 1'b0, 1'b0);
    SREG #(.DATAWIDTH(1)) REG0(cwire, Clk, Rst, c);
endmodule
"#;
    assert_eq!(verilog, expected);
}

#[test]
fn test_unsigned_datapath() {
    let source = "\
input UInt16 a, b, c
input UInt8 d
output UInt16 z
output UInt1 gt
wire UInt16 sum, diff
wire UInt1 sel
register UInt16 acc

sum = a + b
gt = sum > c
sel = a == b
diff = sum - d
acc = sel ? sum : diff
z = acc << 1
";
    let verilog = translate(source, &config("datapath")).unwrap();

    let expected = r#"`timescale 1ns / 1ps

module datapath (
    input Clk, Rst,
    input [15:0] a, b, c,
    input [7:0] d,
    output [15:0] z,
    output gt
);
    wire sel, gtwire;
    wire [15:0] sum, diff;
    wire [15:0] zwire;
    wire [15:0] acc;

    ADD #(.DATAWIDTH(16)) ADD0(a, b, sum);
    COMP #(.DATAWIDTH(16)) COMP0(sum, c, gtwire, 1'b0, 1'b0);
    REG #(.DATAWIDTH(1)) REG0(gtwire, Clk, Rst, gt);
    COMP #(.DATAWIDTH(16)) COMP1(a, b, 1'b0, 1'b0, sel);
    SUB #(.DATAWIDTH(16)) SUB0(sum, {8'b0, d}, diff);
    MUX2x1 #(.DATAWIDTH(16)) MUX0(diff, sum, sel, acc);
    SHL #(.DATAWIDTH(16)) SHL0(acc, 1, zwire);
    REG #(.DATAWIDTH(16)) REG1(zwire, Clk, Rst, z);
endmodule
"#;
    assert_eq!(verilog, expected);
}

#[test]
fn test_every_output_assignment_emits_two_instances() {
    let source = "input Int32 a, b\noutput Int32 x, y, z\nx = a\ny = a * b\nz = a >> b\n";
    let verilog = translate(source, &config("outs")).unwrap();
    let instances: Vec<&str> = verilog
        .lines()
        .filter(|l| l.contains("#(.DATAWIDTH("))
        .collect();

    assert_eq!(instances.len(), 6);
    assert!(instances[0].contains("REG0(a, Clk, Rst, xwire)"));
    assert!(instances[1].contains("REG1(xwire, Clk, Rst, x)"));
    assert!(instances[3].contains("REG2(ywire, Clk, Rst, y)"));
    assert!(instances[5].contains("REG3(zwire, Clk, Rst, z)"));
}

#[test]
fn test_invalid_width_fails() {
    let err = translate("input Int3 a\n", &config("bad")).unwrap_err();
    assert!(matches!(err, DpgenError::InvalidWidth { width: 3, line: 1, .. }));
    assert_eq!(err.class(), ErrorClass::Syntax);
}

#[test]
fn test_undeclared_operand_fails() {
    let err = translate("input Int8 a\noutput Int8 c\nc = a + b\n", &config("bad")).unwrap_err();
    assert_eq!(err.class(), ErrorClass::UnresolvedReference);
}

#[test]
fn test_translate_file_writes_module() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("circuit1.txt");
    let output = dir.path().join("circuit1.v");
    fs::write(&input, "input UInt4 a\nwire UInt4 b\nb = a\n").unwrap();

    translate_file(&input, &output, &TranslateConfig::for_output(&output)).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("module circuit1 ("));
    assert!(text.contains("REG #(.DATAWIDTH(4)) REG0(a, Clk, Rst, b);"));
}

#[test]
fn test_error_marker_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("marked.txt");
    let output = dir.path().join("marked.v");
    fs::write(&input, "input Int8 a, b\noutput Int8 c\nc = a + b // unfinished\n").unwrap();

    let err = translate_file(&input, &output, &TranslateConfig::for_output(&output)).unwrap_err();
    match err {
        DpgenError::ErrorMarker { line, ref message } => {
            assert_eq!(line, 3);
            assert_eq!(message, "unfinished");
        }
        ref other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.txt");
    let output = dir.path().join("missing.v");

    let err = translate_file(&input, &output, &TranslateConfig::new()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::FileAccess);
    assert!(!output.exists());
}

#[test]
fn test_clock_port_cannot_be_redeclared() {
    let err = translate("input Int1 Clk\ninput Int8 a\nwire Int8 x\nx = a\n", &config("clk"))
        .unwrap_err();
    assert!(matches!(err, DpgenError::DuplicateDeclaration { ref name, line: 1 } if name == "Clk"));
    assert_eq!(err.class(), ErrorClass::Syntax);
}

#[test]
fn test_declaration_after_assignment_keeps_its_name() {
    let source = "input Int8 a, b\noutput Int8 c\nc = a + b\nwire Int8 cwire\n";
    let verilog = translate(source, &config("late")).unwrap();

    assert!(verilog.contains("    wire [7:0] cwire_1;\n    wire [7:0] cwire;\n"));
    assert!(verilog.contains("SADD #(.DATAWIDTH(8)) ADD0(a, b, cwire_1);"));
    assert!(verilog.contains("SREG #(.DATAWIDTH(8)) REG0(cwire_1, Clk, Rst, c);"));
}

#[test]
fn test_failed_translation_removes_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.txt");
    let output = dir.path().join("broken.v");
    fs::write(&input, "input Int8 a\noutput Int8 c\nc = a + b\n").unwrap();
    fs::write(&output, "OLD CONTENT").unwrap();

    let err = translate_file(&input, &output, &TranslateConfig::for_output(&output)).unwrap_err();
    assert_eq!(err.class(), ErrorClass::UnresolvedReference);
    assert!(!output.exists());
}
