use anyhow::Context;
use clap::Parser;
use posts_client::utils::{logger, validation::Validate};
use posts_client::{
    CliConfig, Command, ImageUpload, MemoryRouter, PostImage, PostsError, PostsService, Settings,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_cli_logger(settings.verbose, settings.log_format);
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        match e.downcast_ref::<PostsError>() {
            Some(posts_error) => {
                tracing::error!("❌ {}", posts_error);
                eprintln!("❌ {}", posts_error.user_friendly_message());
                eprintln!("💡 {}", posts_error.recovery_suggestion());
                std::process::exit(posts_error.exit_code());
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    let service = PostsService::new(settings, MemoryRouter::new());

    match command {
        Command::List { page, .. } => {
            let mut updates = service.subscribe();
            service.list_posts(settings.page_size, page).await?;

            if let Some(state) = updates.try_next() {
                for post in state.posts.iter() {
                    println!(
                        "{}  {}  [{}]  by {}",
                        post.id,
                        post.title,
                        post.image_path,
                        post.creator.as_deref().unwrap_or("-")
                    );
                }
                println!(
                    "📄 Page {}: {} of {} posts",
                    page,
                    state.posts.len(),
                    state.post_count
                );
            }
        }
        Command::Get { id } => {
            let post = service.fetch_post(&id).await?;
            println!("{}\n{}\n\n{}\n\n🖼  {}", post.id, post.title, post.content, post.image_path);
        }
        Command::Create {
            title,
            content,
            image,
        } => {
            let upload = read_image(&image)?;
            let outcome = service.create_post(&title, &content, upload).await;
            println!("↪ {}", service.navigator().current_url());
            outcome?;
            println!("✅ Post created");
        }
        Command::Update {
            id,
            title,
            content,
            image,
            image_path,
        } => {
            let image = match (image, image_path) {
                (Some(file), _) => PostImage::File(read_image(&file)?),
                (None, Some(path)) => PostImage::Path(path),
                (None, None) => anyhow::bail!("either --image or --image-path is required"),
            };
            let outcome = service.update_post(&id, &title, &content, image).await;
            println!("↪ {}", service.navigator().current_url());
            outcome?;
            println!("✅ Post {} updated", id);
        }
        Command::Delete { id } => {
            service.delete_post(&id).await?;
            println!("🗑  Post {} deleted", id);
        }
    }

    Ok(())
}

fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let upload = ImageUpload::new(bytes);

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => Some("image/png"),
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        _ => None,
    };

    Ok(match mime {
        Some(mime) => upload.with_mime(mime),
        None => upload,
    })
}
