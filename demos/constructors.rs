use gf_arrays::config::ArrayRequest;
use gf_arrays::{Dtype, FieldArray, FieldParams, FieldRegistry, GaloisField, Seed};
use ndarray::array;
use tracing::{error, info};

fn descriptor_example() -> gf_arrays::Result<()> {
    info!("Field descriptors...");
    for (p, m) in [(2u32, 1u32), (2, 8), (7, 3), (2, 100)] {
        let field = GaloisField::new(p, m, None)?;
        info!(
            "{} has order {} and dtypes {:?}",
            field,
            field.order(),
            field.dtypes()
        );
    }
    info!("");
    Ok(())
}

fn constructor_example() -> gf_arrays::Result<()> {
    info!("Constructors over GF(2^3)...");
    let field = GaloisField::new(2u32, 3, None)?;
    info!("zeros = {}", FieldArray::zeros(&field, &[2, 2], None)?);
    info!("ones = {}", FieldArray::ones(&field, &[3], Some(Dtype::I16))?);
    info!("identity = {}", FieldArray::identity(&field, 3, None)?);
    info!(
        "random(seed=42) = {}",
        FieldArray::random(&field, &[4], None, Some(Seed::new(42)))?
    );

    let v = array![[1u8, 0, 1], [1, 1, 0]].into_dyn();
    let a = FieldArray::vector(&field, v.view(), None)?;
    info!("vector([[1,0,1],[1,1,0]]) = {}", a);
    info!("to_vector = {}", a.to_vector(None)?);

    if let Err(e) = FieldArray::zeros(&GaloisField::new(2u32, 8, None)?, &[2], Some(Dtype::U8)) {
        info!("GF(2^8) in u8 is rejected: {}", e);
    }
    info!("");
    Ok(())
}

fn config_example() -> gf_arrays::Result<()> {
    info!("JSON configuration...");
    let registry = FieldRegistry::new();
    let params = FieldParams::from_json(r#"{"characteristic": "36893488147419103183"}"#)?;
    let field = registry.get_params(&params)?;
    let request = ArrayRequest::from_json(r#"{"kind": "random", "shape": [2], "seed": 1337}"#)?;
    info!("{}", request.build(&field)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt().init();

    let examples: [fn() -> gf_arrays::Result<()>; 3] =
        [descriptor_example, constructor_example, config_example];
    for example in examples {
        if let Err(e) = example() {
            error!("Example failed: {}", e);
        }
    }
}
