fn main() -> color_eyre::Result<()> {
    instituto_admin::run()
}
