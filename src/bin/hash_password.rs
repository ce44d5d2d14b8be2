//! 生成后台管理员密码的 bcrypt 哈希，写入 config.toml 的 admin.password_hash
//!
//! 用法: hash-password <password>

use roulette_backend::utils::{hash_password, validate_admin_password};

fn main() {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        std::process::exit(2);
    };

    if let Err(e) = validate_admin_password(&password) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
