use miette::Report;
use simple_json_core::{analyze, ParserSettings};

fn main() {
    let json_data = r#"
        {
            "user": {
                "name": "John Doe",
                "email": "john.doe@example.com"
                "age": 42
            }
        }
    "#;

    match analyze(json_data, "example.json", &ParserSettings::strict()) {
        Ok(value) => {
            println!("Successfully parsed a {} value:\n{value:#?}", value.value_type());
        }
        Err(e) => {
            eprintln!("{:?}", Report::new(e));
        }
    }
}
