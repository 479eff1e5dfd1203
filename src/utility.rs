/*!
# Pennant: Utility Methods.
*/

use crate::ValueError;



/// # Read CSV Record.
///
/// Split a single comma-separated record into its fields.
///
/// Quoted fields may contain commas, newlines, and doubled `""` quotes. A
/// quote anywhere else in an unquoted field is an error, as is a quoted field
/// that never closes or has junk after its closing quote. Whitespace is
/// preserved as-is.
///
/// Leading blank lines are skipped; parsing stops at the end of the first
/// record. Empty input yields an empty list.
pub(crate) fn read_csv(raw: &str) -> Result<Vec<String>, ValueError> {
	let src = raw.trim_start_matches(['\r', '\n']);
	let mut out = Vec::new();
	if src.is_empty() { return Ok(out); }

	let mut chars = src.chars().peekable();
	'fields: loop {
		let mut field = String::new();

		// Quoted.
		if chars.next_if_eq(&'"').is_some() {
			loop {
				match chars.next() {
					Some('"') => match chars.peek() {
						Some('"') => {
							chars.next();
							field.push('"');
						},
						Some(',') => {
							chars.next();
							out.push(field);
							continue 'fields;
						},
						None | Some('\n') => {
							out.push(field);
							return Ok(out);
						},
						Some('\r') => {
							chars.next();
							if matches!(chars.peek(), None | Some('\n')) {
								out.push(field);
								return Ok(out);
							}
							return Err(ValueError::Quote);
						},
						Some(_) => return Err(ValueError::Quote),
					},
					Some(c) => field.push(c),
					None => return Err(ValueError::Quote),
				}
			}
		}

		// Unquoted.
		loop {
			match chars.next() {
				Some(',') => {
					out.push(field);
					continue 'fields;
				},
				None | Some('\n') => {
					out.push(field);
					return Ok(out);
				},
				Some('\r') if matches!(chars.peek(), None | Some('\n')) => {},
				Some('"') => return Err(ValueError::BareQuote),
				Some(c) => field.push(c),
			}
		}
	}
}

/// # Write CSV Record.
///
/// Join fields into a single comma-separated record, quoting any that
/// contain a comma, quote, or line break, or that begin with whitespace.
/// This is the inverse of [`read_csv`].
pub(crate) fn write_csv<S: AsRef<str>>(fields: &[S]) -> String {
	/// # Needs Quotes?
	fn needs_quotes(field: &str) -> bool {
		if field.is_empty() { return false; }
		field == r"\." ||
		field.contains([',', '"', '\r', '\n']) ||
		field.starts_with([' ', '\t'])
	}

	// A lone empty field would otherwise read back as nothing at all.
	if let [only] = fields {
		if only.as_ref().is_empty() { return r#""""#.to_owned(); }
	}

	let mut out = String::new();
	for (idx, field) in fields.iter().enumerate() {
		let field = field.as_ref();
		if idx != 0 { out.push(','); }

		if needs_quotes(field) {
			out.push('"');
			for c in field.chars() {
				if c == '"' { out.push('"'); }
				out.push(c);
			}
			out.push('"');
		}
		else { out.push_str(field); }
	}

	out
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_read_csv() {
		for (raw, expected) in [
			("", vec![]),
			("\n", vec![]),
			("a", vec!["a"]),
			("a,b,c", vec!["a", "b", "c"]),
			("a,,c", vec!["a", "", "c"]),
			("a,", vec!["a", ""]),
			(" a , b ", vec![" a ", " b "]),
			(r#""a,b",c"#, vec!["a,b", "c"]),
			(r#""say ""hi""",x"#, vec![r#"say "hi""#, "x"]),
			(r#""""#, vec![""]),
			("\"multi\nline\",x", vec!["multi\nline", "x"]),
			("a,b\nc,d", vec!["a", "b"]),
			("a,b\r\n", vec!["a", "b"]),
			("\n\na", vec!["a"]),
		] {
			let out = read_csv(raw).expect("CSV failed.");
			assert_eq!(out, expected, "Bug: reading {raw:?}.");
		}
	}

	#[test]
	fn t_read_csv_bad() {
		assert_eq!(read_csv(r#"a"b"#), Err(ValueError::BareQuote));
		assert_eq!(read_csv(r#" "a""#), Err(ValueError::BareQuote));
		assert_eq!(read_csv(r#""abc"#), Err(ValueError::Quote));
		assert_eq!(read_csv(r#""a"b,c"#), Err(ValueError::Quote));
	}

	#[test]
	fn t_write_csv() {
		assert_eq!(write_csv::<&str>(&[]), "");
		assert_eq!(write_csv(&[""]), r#""""#);
		assert_eq!(write_csv(&["a", "b"]), "a,b");
		assert_eq!(write_csv(&["a", ""]), "a,");
		assert_eq!(write_csv(&["a,b", "c"]), r#""a,b",c"#);
		assert_eq!(write_csv(&[r#"say "hi""#]), r#""say ""hi""""#);
		assert_eq!(write_csv(&[" pad"]), r#"" pad""#);
		assert_eq!(write_csv(&[r"\."]), r#""\.""#);

		// And back again.
		for fields in [
			vec!["one", "two, three", " four", "\"five\""],
			vec!["", "x", ""],
			vec!["line\nbreak"],
		] {
			let fields: Vec<String> = fields.into_iter().map(String::from).collect();
			assert_eq!(read_csv(&write_csv(&fields)), Ok(fields));
		}
	}
}
